/// Sentinel returned when a pick lands outside the image.
pub const BLACK: RGBColor = RGBColor {
    red: 0,
    green: 0,
    blue: 0,
};

/// Default swatch color shown before any pick. Absence of a selection is
/// modelled as `Option::None`, never as white, so a deliberately picked
/// white secondary keys white pixels out like any other color.
pub const WHITE: RGBColor = RGBColor {
    red: 255,
    green: 255,
    blue: 255,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RGBColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl RGBColor {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        RGBColor { red, green, blue }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RGBAColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl RGBAColor {
    pub fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        RGBAColor {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// The RGB part of this color. Alpha takes no part in reference color
    /// comparisons.
    pub fn rgb(&self) -> RGBColor {
        RGBColor {
            red: self.red,
            green: self.green,
            blue: self.blue,
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.alpha == 0
    }
}

impl From<RGBColor> for RGBAColor {
    fn from(value: RGBColor) -> Self {
        RGBAColor {
            red: value.red,
            green: value.green,
            blue: value.blue,
            alpha: u8::MAX,
        }
    }
}

#[cfg(test)]
impl RGBColor {
    pub fn red() -> Self {
        RGBColor {
            red: 255,
            green: 0,
            blue: 0,
        }
    }

    pub fn green() -> Self {
        RGBColor {
            red: 0,
            green: 255,
            blue: 0,
        }
    }
}
