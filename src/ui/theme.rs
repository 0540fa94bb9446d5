use ratatui::style::Color;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub title: Color,
    pub sheet_border: Color,
    pub handle: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub in_range_bg: Color,
    pub focus: Color,
    pub today: Color,
    pub weekday_header: Color,
    pub sunday: Color,
    pub disabled: Color,
    pub status_bar: Color,
    pub error: Color,
    pub success: Color,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            name: "default".to_string(),
            title: Color::Cyan,
            sheet_border: Color::White,
            handle: Color::Gray,
            selected_bg: Color::Blue,
            selected_fg: Color::White,
            in_range_bg: Color::DarkGray,
            focus: Color::Yellow,
            today: Color::Green,
            weekday_header: Color::Yellow,
            sunday: Color::LightRed,
            disabled: Color::DarkGray,
            status_bar: Color::White,
            error: Color::Red,
            success: Color::Green,
        }
    }

    pub fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            title: Color::Rgb(251, 184, 108),
            sheet_border: Color::Rgb(235, 219, 178),
            handle: Color::Rgb(168, 153, 132),
            selected_bg: Color::Rgb(69, 133, 136),
            selected_fg: Color::Rgb(235, 219, 178),
            in_range_bg: Color::Rgb(60, 56, 54),
            focus: Color::Rgb(250, 189, 47),
            today: Color::Rgb(184, 187, 38),
            weekday_header: Color::Rgb(254, 128, 25),
            sunday: Color::Rgb(251, 73, 52),
            disabled: Color::Rgb(102, 92, 84),
            status_bar: Color::Rgb(235, 219, 178),
            error: Color::Rgb(251, 73, 52),
            success: Color::Rgb(184, 187, 38),
        }
    }

    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            title: Color::Rgb(136, 192, 208),
            sheet_border: Color::Rgb(216, 222, 233),
            handle: Color::Rgb(129, 161, 193),
            selected_bg: Color::Rgb(94, 129, 172),
            selected_fg: Color::Rgb(236, 239, 244),
            in_range_bg: Color::Rgb(59, 66, 82),
            focus: Color::Rgb(235, 203, 139),
            today: Color::Rgb(163, 190, 140),
            weekday_header: Color::Rgb(235, 203, 139),
            sunday: Color::Rgb(191, 97, 106),
            disabled: Color::Rgb(76, 86, 106),
            status_bar: Color::Rgb(216, 222, 233),
            error: Color::Rgb(191, 97, 106),
            success: Color::Rgb(163, 190, 140),
        }
    }

    pub fn get_by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "gruvbox" => Self::gruvbox(),
            "nord" => Self::nord(),
            _ => Self::default_theme(),
        }
    }

    pub fn available_themes() -> Vec<&'static str> {
        vec!["default", "gruvbox", "nord"]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}
