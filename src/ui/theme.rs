use ratatui::style::Color;
use ratatui::widgets::BorderType;

use crate::system::history::Metric;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderStyle {
    Rounded,
    Thin,
}

impl BorderStyle {
    pub fn from_config_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "rounded" => BorderStyle::Rounded,
            _ => BorderStyle::Thin,
        }
    }

    pub fn border_type(self) -> BorderType {
        match self {
            BorderStyle::Rounded => BorderType::Rounded,
            BorderStyle::Thin => BorderType::Plain,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    pub overview_border: Color,
    pub table_border: Color,
    pub table_header: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub battery: Color,
    pub identity: Color,
    pub statusbar_bg: Color,
    pub status_err: Color,
    pub pill_key_bg: Color,
    pub pill_key_fg: Color,
    pub pill_desc_fg: Color,
    /// Indexed like `Metric::ALL`.
    pub metric_colors: [Color; 6],
}

impl Theme {
    pub fn from_config(theme_name: &str) -> Self {
        match theme_name.to_lowercase().as_str() {
            "light" => Self::light(),
            "mono" | "monochrome" => Self::mono(),
            _ => Self::dark(),
        }
    }

    pub fn metric_color(&self, metric: Metric) -> Color {
        self.metric_colors[metric.index()]
    }

    pub fn dark() -> Self {
        Theme {
            name: "dark",
            overview_border: Color::Blue,
            table_border: Color::Green,
            table_header: Color::Magenta,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            battery: Color::Green,
            identity: Color::Magenta,
            statusbar_bg: Color::DarkGray,
            status_err: Color::Red,
            pill_key_bg: Color::Yellow,
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::White,
            metric_colors: [
                Color::Green,
                Color::Red,
                Color::Yellow,
                Color::Magenta,
                Color::Cyan,
                Color::LightBlue,
            ],
        }
    }

    pub fn light() -> Self {
        Theme {
            name: "light",
            overview_border: Color::Rgb(37, 99, 235),
            table_border: Color::Rgb(22, 163, 74),
            table_header: Color::Rgb(147, 51, 234),
            text_primary: Color::Black,
            text_secondary: Color::Rgb(71, 85, 105),
            battery: Color::Rgb(22, 163, 74),
            identity: Color::Rgb(147, 51, 234),
            statusbar_bg: Color::Rgb(226, 232, 240),
            status_err: Color::Rgb(220, 38, 38),
            pill_key_bg: Color::Rgb(37, 99, 235),
            pill_key_fg: Color::White,
            pill_desc_fg: Color::Black,
            metric_colors: [
                Color::Rgb(22, 163, 74),
                Color::Rgb(220, 38, 38),
                Color::Rgb(202, 138, 4),
                Color::Rgb(192, 38, 211),
                Color::Rgb(8, 145, 178),
                Color::Rgb(37, 99, 235),
            ],
        }
    }

    pub fn mono() -> Self {
        Theme {
            name: "mono",
            overview_border: Color::Gray,
            table_border: Color::Gray,
            table_header: Color::White,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            battery: Color::White,
            identity: Color::White,
            statusbar_bg: Color::DarkGray,
            status_err: Color::White,
            pill_key_bg: Color::Gray,
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::White,
            metric_colors: [Color::White; 6],
        }
    }
}
