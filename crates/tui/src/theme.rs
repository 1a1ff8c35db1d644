use ratatui::style::Color;

pub struct Theme {
    pub border_focus: Color,
    pub border_inactive: Color,
    pub title: Color,
    pub button_fg: Color,
    pub button_focus_fg: Color,
    pub button_focus_bg: Color,
    pub clear_fg: Color,
    pub alert_border: Color,
    pub hint: Color,
}

pub const THEME: Theme = Theme {
    border_focus: Color::Rgb(0x66, 0x7e, 0xea),
    border_inactive: Color::DarkGray,
    title: Color::Yellow,
    button_fg: Color::Cyan,
    button_focus_fg: Color::Black,
    button_focus_bg: Color::Cyan,
    clear_fg: Color::LightRed,
    alert_border: Color::Red,
    hint: Color::DarkGray,
};
