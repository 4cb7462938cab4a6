/// An 8-bit RGBA color.
///
/// Target tints, tracer fades, and HUD accents all flow through this type;
/// the GPU backend converts to float at upload time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const RED: Rgba = Rgba::rgb(230, 41, 55);
    pub const BLUE: Rgba = Rgba::rgb(0, 121, 241);
    pub const YELLOW: Rgba = Rgba::rgb(253, 249, 0);
    pub const PURPLE: Rgba = Rgba::rgb(200, 122, 255);
    pub const ORANGE: Rgba = Rgba::rgb(255, 161, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

    /// Ground plane green.
    pub const FOREST_GREEN: Rgba = Rgba::rgb(34, 139, 34);
    /// Clear color behind the world.
    pub const SKY_BLUE: Rgba = Rgba::rgb(135, 206, 235);
    /// Enemy body magenta.
    pub const MAGENTA: Rgba = Rgba::rgb(255, 0, 100);
    /// Wireframe gray used for cube edges.
    pub const EDGE_GRAY: Rgba = Rgba::rgb(50, 50, 50);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Same color with a replaced alpha channel.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Scale alpha by a 0..=1 factor (clamped). Used for timed fades.
    pub fn faded(self, factor: f32) -> Self {
        let a = (self.a as f32 * factor.clamp(0.0, 1.0)) as u8;
        self.with_alpha(a)
    }

    /// Normalized float components for GPU upload.
    pub fn to_f32_array(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_is_opaque() {
        assert_eq!(Rgba::rgb(1, 2, 3).a, 255);
    }

    #[test]
    fn with_alpha_preserves_channels() {
        let c = Rgba::RED.with_alpha(100);
        assert_eq!((c.r, c.g, c.b), (Rgba::RED.r, Rgba::RED.g, Rgba::RED.b));
        assert_eq!(c.a, 100);
    }

    #[test]
    fn faded_scales_alpha() {
        let c = Rgba::YELLOW.faded(0.5);
        assert_eq!(c.a, 127);
    }

    #[test]
    fn faded_clamps_factor() {
        assert_eq!(Rgba::WHITE.faded(2.0).a, 255);
        assert_eq!(Rgba::WHITE.faded(-1.0).a, 0);
    }

    #[test]
    fn float_conversion_is_normalized() {
        let f = Rgba::WHITE.to_f32_array();
        assert_eq!(f, [1.0, 1.0, 1.0, 1.0]);
        let g = Rgba::new(0, 0, 0, 0).to_f32_array();
        assert_eq!(g, [0.0, 0.0, 0.0, 0.0]);
    }
}
