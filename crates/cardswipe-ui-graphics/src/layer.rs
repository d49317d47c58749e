//! Graphics layer written onto the swiped node every move and every frame.

/// Translation, rotation, uniform scale and opacity of one visual node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphicsLayer {
    pub translation_x: f32,
    pub translation_y: f32,
    /// Clockwise rotation in degrees.
    pub rotation: f32,
    pub scale: f32,
    pub alpha: f32,
}

impl GraphicsLayer {
    pub const NEUTRAL: GraphicsLayer = GraphicsLayer {
        translation_x: 0.0,
        translation_y: 0.0,
        rotation: 0.0,
        scale: 1.0,
        alpha: 1.0,
    };

    pub fn is_neutral(&self) -> bool {
        *self == Self::NEUTRAL
    }

    /// Combined translate * rotate * scale matrix. Opacity is carried separately.
    pub fn transform(&self) -> Affine {
        let radians = self.rotation.to_radians();
        let (sin, cos) = radians.sin_cos();
        Affine {
            a: cos * self.scale,
            b: sin * self.scale,
            c: -sin * self.scale,
            d: cos * self.scale,
            tx: self.translation_x,
            ty: self.translation_y,
        }
    }
}

impl Default for GraphicsLayer {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// 2-D affine matrix in column-major `[a c tx; b d ty]` form.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.a * x + self.c * y + self.tx,
            self.b * x + self.d * y + self.ty,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_layer_is_identity() {
        assert_eq!(GraphicsLayer::NEUTRAL.transform(), Affine::IDENTITY);
        assert!(GraphicsLayer::default().is_neutral());
    }

    #[test]
    fn quarter_turn_maps_x_axis_onto_y_axis() {
        let layer = GraphicsLayer {
            translation_x: 10.0,
            rotation: 90.0,
            scale: 2.0,
            ..GraphicsLayer::NEUTRAL
        };
        let (x, y) = layer.transform().apply(1.0, 0.0);
        assert!((x - 10.0).abs() < 1e-4);
        assert!((y - 2.0).abs() < 1e-4);
    }
}
