use std::sync::Arc;

use tracing::{debug, warn};

use crate::family::{self, Family};
use crate::hooks::Hooks;
use crate::resample::{resize_preserving_order, resize_with_interpolation};
use crate::{
    color_gradient, color_to_rgba, Aabb, CloudConfig, Color, ColoredPoint, Mutation,
    PointCloudError, Result, Rgba,
};

/// An ordered set of 3D points, each paired with an RGBA color.
///
/// Positions are stored as separate `x`, `y`, `z` columns next to a color
/// column of the same length; every operation keeps the four columns the
/// same length. A cloud owns its children, and family-wide operations
/// ([`filter_out`](Self::filter_out), [`sort_points`](Self::sort_points),
/// [`set_color`](Self::set_color)) walk the whole tree.
#[derive(Debug, Clone, Default)]
pub struct PointCloud {
    x: Vec<f32>,
    y: Vec<f32>,
    z: Vec<f32>,
    rgbas: Vec<Rgba>,
    children: Vec<PointCloud>,
    config: CloudConfig,
    hooks: Hooks,
}

/// How [`PointCloud::add_points`] colors the points it appends.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PointColors<'a> {
    /// Repeat the cloud's current last color.
    #[default]
    Inherit,
    /// One explicit color per appended point.
    Rgbas(&'a [Rgba]),
    /// The same color for every appended point. Without an opacity the
    /// cloud's current last alpha is used.
    Uniform { color: Color, opacity: Option<f32> },
}

impl PointCloud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CloudConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// Builds a cloud colored with the default config color.
    pub fn from_points(points: &[[f32; 3]]) -> Self {
        let mut cloud = Self::new();
        cloud.write_points(points);
        cloud.rgbas = vec![cloud.config.fill_rgba(); points.len()];
        cloud
    }

    pub fn from_xyz(x: Vec<f32>, y: Vec<f32>, z: Vec<f32>) -> Result<Self> {
        if x.len() != y.len() || x.len() != z.len() {
            return Err(PointCloudError::InvalidArgument(format!(
                "coordinate columns differ in length: x={}, y={}, z={}",
                x.len(),
                y.len(),
                z.len()
            )));
        }
        let mut cloud = Self::new();
        cloud.rgbas = vec![cloud.config.fill_rgba(); x.len()];
        cloud.x = x;
        cloud.y = y;
        cloud.z = z;
        Ok(cloud)
    }

    pub fn len(&self) -> usize {
        debug_assert_eq!(self.x.len(), self.y.len());
        debug_assert_eq!(self.x.len(), self.z.len());
        debug_assert_eq!(self.x.len(), self.rgbas.len());
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn num_points(&self) -> usize {
        self.len()
    }

    pub fn config(&self) -> &CloudConfig {
        &self.config
    }

    pub fn x(&self) -> &[f32] {
        &self.x
    }

    pub fn y(&self) -> &[f32] {
        &self.y
    }

    pub fn z(&self) -> &[f32] {
        &self.z
    }

    pub fn rgbas(&self) -> &[Rgba] {
        &self.rgbas
    }

    pub fn point(&self, i: usize) -> Option<[f32; 3]> {
        (i < self.len()).then(|| [self.x[i], self.y[i], self.z[i]])
    }

    pub fn points(&self) -> Vec<[f32; 3]> {
        self.iter_points().collect()
    }

    pub fn iter_points(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .zip(&self.z)
            .map(|((x, y), z)| [*x, *y, *z])
    }

    pub fn iter_colored(&self) -> impl Iterator<Item = ColoredPoint> + '_ {
        self.iter_points()
            .zip(&self.rgbas)
            .map(|(position, rgba)| ColoredPoint {
                position,
                rgba: *rgba,
            })
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_points(self.iter_points())
    }

    /// Bounding box of this cloud and all of its descendants.
    pub fn family_aabb(&self) -> Aabb {
        self.family()
            .into_iter()
            .fold(Aabb::empty(), |acc, member| acc.union(&member.aabb()))
    }

    /// Registers `hook` to run after every successful change to this cloud.
    ///
    /// Hooks are per cloud: a change to a child runs the child's hooks.
    /// Clones share the hooks of the cloud they were cloned from.
    pub fn on_mutation(
        &mut self,
        hook: impl Fn(Mutation, &PointCloud) + Send + Sync + 'static,
    ) -> &mut Self {
        self.hooks.push(Arc::new(hook));
        self
    }

    #[cfg(test)]
    fn hook_count(&self) -> usize {
        self.hooks.len()
    }

    fn notify(&self, mutation: Mutation) {
        self.hooks.dispatch(mutation, self);
    }

    // --- family ---

    pub fn add(&mut self, child: PointCloud) -> &mut Self {
        self.children.push(child);
        self
    }

    pub fn children(&self) -> &[PointCloud] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [PointCloud] {
        &mut self.children
    }

    /// This cloud followed by every descendant, depth first.
    pub fn family(&self) -> Vec<&PointCloud> {
        family::family(self)
    }

    pub fn family_members_with_points(&self) -> Vec<&PointCloud> {
        self.family()
            .into_iter()
            .filter(|member| !member.is_empty())
            .collect()
    }

    // --- points ---

    /// Replaces every position.
    ///
    /// Colors are resampled to the new length so a gradient across the old
    /// points stretches across the new ones. A cloud without colors fills
    /// with its config color.
    pub fn set_points(&mut self, points: &[[f32; 3]]) -> &mut Self {
        let n = points.len();
        self.rgbas = resize_with_interpolation(&self.rgbas, n)
            .unwrap_or_else(|| vec![self.config.fill_rgba(); n]);
        self.write_points(points);
        debug!(points = n, "set points");
        self.notify(Mutation::SetPoints);
        self
    }

    pub fn clear_points(&mut self) -> &mut Self {
        self.x.clear();
        self.y.clear();
        self.z.clear();
        self.rgbas.clear();
        debug!("cleared points");
        self.notify(Mutation::Clear);
        self
    }

    /// Appends `points`, coloring them as `colors` says.
    ///
    /// Fails without touching the cloud when an explicit color slice does
    /// not match `points` in length or an opacity lies outside `[0, 1]`.
    pub fn add_points(&mut self, points: &[[f32; 3]], colors: PointColors<'_>) -> Result<&mut Self> {
        match colors {
            PointColors::Rgbas(rgbas) if rgbas.len() != points.len() => {
                warn!(points = points.len(), rgbas = rgbas.len(), "rejected add_points");
                return Err(PointCloudError::InvalidArgument(format!(
                    "got {} colors for {} points",
                    rgbas.len(),
                    points.len()
                )));
            }
            PointColors::Uniform {
                opacity: Some(opacity),
                ..
            } => check_opacity(opacity)?,
            _ => {}
        }

        let start = self.len();
        let end = start + points.len();
        self.x.extend(points.iter().map(|p| p[0]));
        self.y.extend(points.iter().map(|p| p[1]));
        self.z.extend(points.iter().map(|p| p[2]));
        self.rgbas = resize_preserving_order(&self.rgbas, end, self.config.fill_rgba());

        match colors {
            PointColors::Inherit => {}
            PointColors::Rgbas(rgbas) => self.rgbas[start..end].copy_from_slice(rgbas),
            PointColors::Uniform { color, opacity } => {
                // after padding, the last alpha is the one the cloud had before the append
                let opacity = opacity.unwrap_or_else(|| {
                    self.rgbas.last().map_or(self.config.opacity, |rgba| rgba[3])
                });
                self.rgbas[start..end].fill(color_to_rgba(color, opacity));
            }
        }

        debug!(added = points.len(), points = end, "appended points");
        self.notify(Mutation::AppendPoints);
        Ok(self)
    }

    pub fn add_point(&mut self, point: [f32; 3], colors: PointColors<'_>) -> Result<&mut Self> {
        self.add_points(&[point], colors)
    }

    // --- colors ---

    pub fn set_rgbas(&mut self, rgbas: &[Rgba]) -> Result<&mut Self> {
        if rgbas.len() != self.len() {
            return Err(PointCloudError::InvalidArgument(format!(
                "got {} colors for {} points",
                rgbas.len(),
                self.len()
            )));
        }
        self.rgbas.copy_from_slice(rgbas);
        self.notify(Mutation::Colors);
        Ok(self)
    }

    /// Colors the whole family with `color`.
    ///
    /// Without an opacity each point keeps its own alpha.
    pub fn set_color(&mut self, color: Color, opacity: Option<f32>) -> Result<&mut Self> {
        if let Some(opacity) = opacity {
            check_opacity(opacity)?;
        }
        family::walk_mut(self, &mut |member: &mut PointCloud| {
            member.config.color = color;
            if let Some(opacity) = opacity {
                member.config.opacity = opacity;
            }
            for rgba in &mut member.rgbas {
                *rgba = color_to_rgba(color, opacity.unwrap_or(rgba[3]));
            }
            member.notify(Mutation::Colors);
        });
        Ok(self)
    }

    pub fn set_opacity(&mut self, opacity: f32) -> Result<&mut Self> {
        check_opacity(opacity)?;
        family::walk_mut(self, &mut |member: &mut PointCloud| {
            member.config.opacity = opacity;
            for rgba in &mut member.rgbas {
                rgba[3] = opacity;
            }
            member.notify(Mutation::Colors);
        });
        Ok(self)
    }

    /// Colors point `i` with the gradient through `stops` sampled at
    /// `i / (n - 1)`. The result is fully opaque.
    pub fn set_color_by_gradient(&mut self, stops: &[Color]) -> Result<&mut Self> {
        let gradient = color_gradient(stops, self.len())?;
        self.rgbas = gradient.into_iter().map(|c| c.to_rgba(1.0)).collect();
        self.notify(Mutation::Colors);
        Ok(self)
    }

    /// Copies `other`'s colors, resampled to this cloud's length.
    pub fn match_colors(&mut self, other: &PointCloud) -> Result<&mut Self> {
        let rgbas = resize_with_interpolation(&other.rgbas, self.len())
            .ok_or(PointCloudError::EmptyCloud("match_colors source"))?;
        self.rgbas = rgbas;
        self.notify(Mutation::Colors);
        Ok(self)
    }

    // --- reordering ---

    /// Removes, from this cloud and every descendant, each point for which
    /// `predicate` returns true. Survivors keep their order.
    pub fn filter_out(&mut self, mut predicate: impl FnMut([f32; 3]) -> bool) -> &mut Self {
        family::walk_mut(self, &mut |member: &mut PointCloud| {
            if member.is_empty() {
                return;
            }
            let keep: Vec<usize> = (0..member.len())
                .filter(|&i| !predicate([member.x[i], member.y[i], member.z[i]]))
                .collect();
            if keep.len() == member.len() {
                return;
            }
            debug!(removed = member.len() - keep.len(), kept = keep.len(), "filtered points");
            member.reorder(&keep);
            member.notify(Mutation::Filter);
        });
        self
    }

    /// Sorts the points of this cloud and every descendant by ascending
    /// `key`, carrying colors along.
    ///
    /// The sort is stable and orders keys with [`f32::total_cmp`].
    pub fn sort_points(&mut self, mut key: impl FnMut([f32; 3]) -> f32) -> &mut Self {
        family::walk_mut(self, &mut |member: &mut PointCloud| {
            if member.is_empty() {
                return;
            }
            let keys: Vec<f32> = member.iter_points().map(&mut key).collect();
            let mut order: Vec<usize> = (0..keys.len()).collect();
            order.sort_by(|&a, &b| keys[a].total_cmp(&keys[b]));
            debug!(points = order.len(), "sorted points");
            member.reorder(&order);
            member.notify(Mutation::Sort);
        });
        self
    }

    pub fn sort_points_by_x(&mut self) -> &mut Self {
        self.sort_points(|p| p[0])
    }

    /// Replaces this cloud's data with the concatenated data of its whole
    /// family, itself first. Children are left as they are.
    pub fn ingest_submobjects(&mut self) -> &mut Self {
        let members = self.family();
        let total: usize = members.iter().map(|m| m.len()).sum();
        let mut x = Vec::with_capacity(total);
        let mut y = Vec::with_capacity(total);
        let mut z = Vec::with_capacity(total);
        let mut rgbas = Vec::with_capacity(total);
        for member in &members {
            x.extend_from_slice(&member.x);
            y.extend_from_slice(&member.y);
            z.extend_from_slice(&member.z);
            rgbas.extend_from_slice(&member.rgbas);
        }
        debug!(members = members.len(), points = total, "ingested family");

        self.x = x;
        self.y = y;
        self.z = z;
        self.rgbas = rgbas;
        self.notify(Mutation::Ingest);
        self
    }

    // --- proportions ---

    /// The point at index `floor(alpha * (n - 1))`, with `alpha` clamped to
    /// `[0, 1]`.
    pub fn point_from_proportion(&self, alpha: f64) -> Result<[f32; 3]> {
        if self.is_empty() {
            return Err(PointCloudError::EmptyCloud("point_from_proportion"));
        }
        if alpha.is_nan() {
            return Err(PointCloudError::InvalidArgument(
                "proportion must not be NaN".to_string(),
            ));
        }
        let alpha = alpha.clamp(0.0, 1.0);
        let index = (alpha * (self.len() - 1) as f64).floor() as usize;
        Ok([self.x[index], self.y[index], self.z[index]])
    }

    /// Makes this cloud a copy of `other`'s rows `floor(a * n)` up to (not
    /// including) `floor(b * n)`.
    ///
    /// Requires `0 <= a <= b <= 1`. An empty `other` leaves this cloud
    /// empty.
    pub fn pointwise_become_partial(&mut self, other: &PointCloud, a: f64, b: f64) -> Result<&mut Self> {
        if !(0.0..=1.0).contains(&a) || !(0.0..=1.0).contains(&b) || a > b {
            warn!(a, b, "rejected partial range");
            return Err(PointCloudError::InvalidArgument(format!(
                "partial range must satisfy 0 <= a <= b <= 1, got a={a}, b={b}"
            )));
        }
        let n = other.len();
        let lower = ((a * n as f64).floor() as usize).min(n);
        let upper = ((b * n as f64).floor() as usize).min(n);

        self.x = other.x[lower..upper].to_vec();
        self.y = other.y[lower..upper].to_vec();
        self.z = other.z[lower..upper].to_vec();
        self.rgbas = other.rgbas[lower..upper].to_vec();
        debug!(lower, upper, of = n, "became partial");
        self.notify(Mutation::Partial);
        Ok(self)
    }

    // --- selection ---

    /// A new childless cloud holding the rows at `indices`, in that order.
    pub fn select(&self, indices: &[usize]) -> Result<Self> {
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.len()) {
            return Err(PointCloudError::InvalidArgument(format!(
                "index {bad} out of bounds for {} points",
                self.len()
            )));
        }
        let mut out = Self {
            config: self.config,
            ..Self::default()
        };
        out.x = indices.iter().map(|&i| self.x[i]).collect();
        out.y = indices.iter().map(|&i| self.y[i]).collect();
        out.z = indices.iter().map(|&i| self.z[i]).collect();
        out.rgbas = indices.iter().map(|&i| self.rgbas[i]).collect();
        Ok(out)
    }

    /// Every row NOT in `indices`, in original order.
    pub fn select_inverse(&self, indices: &[usize]) -> Result<Self> {
        let n = self.len();
        let mut exclude = vec![false; n];
        for &idx in indices {
            if idx >= n {
                return Err(PointCloudError::InvalidArgument(format!(
                    "index {idx} out of bounds for {n} points"
                )));
            }
            exclude[idx] = true;
        }

        let kept: Vec<usize> = (0..n).filter(|&i| !exclude[i]).collect();
        self.select(&kept)
    }

    fn write_points(&mut self, points: &[[f32; 3]]) {
        self.x = points.iter().map(|p| p[0]).collect();
        self.y = points.iter().map(|p| p[1]).collect();
        self.z = points.iter().map(|p| p[2]).collect();
    }

    /// Rebuilds every column from the in-bounds row `order`.
    fn reorder(&mut self, order: &[usize]) {
        self.x = order.iter().map(|&i| self.x[i]).collect();
        self.y = order.iter().map(|&i| self.y[i]).collect();
        self.z = order.iter().map(|&i| self.z[i]).collect();
        self.rgbas = order.iter().map(|&i| self.rgbas[i]).collect();
    }
}

fn check_opacity(opacity: f32) -> Result<()> {
    if (0.0..=1.0).contains(&opacity) {
        Ok(())
    } else {
        Err(PointCloudError::InvalidArgument(format!(
            "opacity must be within [0, 1], got {opacity}"
        )))
    }
}

impl PartialEq for PointCloud {
    /// Compares data, children and config. Hooks are ignored.
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x
            && self.y == other.y
            && self.z == other.z
            && self.rgbas == other.rgbas
            && self.children == other.children
            && self.config == other.config
    }
}

impl Family for PointCloud {
    fn children(&self) -> &[Self] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut [Self] {
        &mut self.children
    }
}
