use crate::config::ChartConfig;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextWeight {
    #[default]
    Normal,
    Bold,
}

impl TextWeight {
    pub fn css(self) -> &'static str {
        match self {
            TextWeight::Normal => "normal",
            TextWeight::Bold => "bold",
        }
    }
}

// Shared by every label.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub weight: TextWeight,
    pub color: String,
}

const MIN_TEXT_SIZE: f64 = 1.0;

impl TextStyle {
    pub fn from_config(cfg: &ChartConfig) -> Self {
        Self {
            size: cfg.default_text_size,
            weight: TextWeight::Normal,
            color: cfg.default_text_color.clone(),
        }
    }

    pub fn increase(&mut self) {
        self.size += 1.0;
    }

    pub fn decrease(&mut self) {
        self.size = (self.size - 1.0).max(MIN_TEXT_SIZE);
    }

    pub fn bold(&mut self) {
        self.weight = TextWeight::Bold;
    }

    pub fn reset(&mut self, cfg: &ChartConfig) {
        *self = Self::from_config(cfg);
    }

    /// Canvas font shorthand.
    pub fn font(&self) -> String {
        format!("{} {}px sans-serif", self.weight.css(), self.size)
    }
}
