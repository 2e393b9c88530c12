use serde::Deserialize;

/// Straight-alpha RGBA color with `f32` channels in `[0, 1]`.
///
/// Used for the frame clear color, which the backend hands to the GPU as-is.
#[derive(Debug, Copy, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl From<Color> for wgpu::Color {
    fn from(c: Color) -> Self {
        wgpu::Color {
            r: c.r as f64,
            g: c.g as f64,
            b: c.b as f64,
            a: c.a as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_to_wgpu_channels() {
        let c: wgpu::Color = Color::rgba(0.25, 0.5, 1.0, 0.0).into();
        assert_eq!((c.r, c.g, c.b, c.a), (0.25, 0.5, 1.0, 0.0));
    }
}
