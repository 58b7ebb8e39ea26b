use nu_ansi_term::Color;

/// Catppuccin Mocha accents used for the default palette.
pub mod catppuccin {
    use nu_ansi_term::Color;

    pub struct Mocha;

    impl Mocha {
        pub const OVERLAY0: Color = Color::Rgb(108, 112, 134);
        pub const RED: Color = Color::Rgb(243, 139, 168);
        pub const GREEN: Color = Color::Rgb(166, 227, 161);
        pub const YELLOW: Color = Color::Rgb(249, 226, 175);
        pub const BLUE: Color = Color::Rgb(137, 180, 250);
        pub const MAUVE: Color = Color::Rgb(203, 166, 247);
        pub const PEACH: Color = Color::Rgb(250, 179, 135);
        pub const SKY: Color = Color::Rgb(137, 220, 235);
        pub const PINK: Color = Color::Rgb(245, 194, 231);
    }
}

/// Groups of Brainfunc symbols that share a colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolClass {
    Movement,
    Data,
    Output,
    Input,
    Flow,
    Halt,
    Function,
    Comment,
    Other,
}

impl SymbolClass {
    /// Class of a single symbol outside of any comment.
    pub fn of(ch: char) -> Self {
        match ch {
            '>' | '<' => SymbolClass::Movement,
            '+' | '-' => SymbolClass::Data,
            '.' | ':' => SymbolClass::Output,
            ',' => SymbolClass::Input,
            '[' | ']' | '~' => SymbolClass::Flow,
            '!' => SymbolClass::Halt,
            '$' | '{' | '}' | '(' | ')' => SymbolClass::Function,
            '#' | '%' => SymbolClass::Comment,
            _ => SymbolClass::Other,
        }
    }
}

/// Editor colours, one per [`SymbolClass`].
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub movement: Color,
    pub data: Color,
    pub output: Color,
    pub input: Color,
    pub flow: Color,
    pub halt: Color,
    pub function: Color,
    pub comment: Color,
    pub other: Color,
}

impl Default for Palette {
    fn default() -> Self {
        use catppuccin::Mocha as P;
        Self {
            movement: P::SKY,
            data: P::GREEN,
            output: P::YELLOW,
            input: P::PEACH,
            flow: P::MAUVE,
            halt: P::RED,
            function: P::BLUE,
            comment: P::OVERLAY0,
            other: P::PINK,
        }
    }
}

impl Palette {
    pub fn color_for(&self, class: SymbolClass) -> Color {
        match class {
            SymbolClass::Movement => self.movement,
            SymbolClass::Data => self.data,
            SymbolClass::Output => self.output,
            SymbolClass::Input => self.input,
            SymbolClass::Flow => self.flow,
            SymbolClass::Halt => self.halt,
            SymbolClass::Function => self.function,
            SymbolClass::Comment => self.comment,
            SymbolClass::Other => self.other,
        }
    }

    /// Set the colour named by a config key. Returns false for unknown keys.
    pub fn set(&mut self, key: &str, color: Color) -> bool {
        let slot = match key {
            "movement" => &mut self.movement,
            "data" => &mut self.data,
            "output" => &mut self.output,
            "input" => &mut self.input,
            "flow" => &mut self.flow,
            "halt" => &mut self.halt,
            "function" => &mut self.function,
            "comment" => &mut self.comment,
            "other" => &mut self.other,
            _ => return false,
        };
        *slot = color;
        true
    }
}

/// Parse `#RRGGBB` or a basic colour name.
pub fn parse_color(value: &str) -> Option<Color> {
    let s = value.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        return Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?));
    }

    let name = s.to_ascii_lowercase().replace('_', "");
    Some(match name.as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" | "purple" => Color::Purple,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "gray" | "grey" | "darkgray" | "darkgrey" => Color::DarkGray,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightyellow" => Color::LightYellow,
        "lightblue" => Color::LightBlue,
        "lightmagenta" | "lightpurple" => Color::LightPurple,
        "lightcyan" => Color::LightCyan,
        "lightgray" | "lightgrey" => Color::LightGray,
        _ => return None,
    })
}
