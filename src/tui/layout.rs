/// Responsive breakpoints for layout decisions.
///
/// Single source of truth for width thresholds.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Breakpoint {
    /// < 60 cols: one product field per line, short labels
    Compact,
    /// 60-119 cols: product cards in a single column
    Normal,
    /// 120+ cols: logs beside the product list
    Wide,
}

impl Breakpoint {
    pub fn from_width(width: u16) -> Self {
        match width {
            0..=59 => Breakpoint::Compact,
            60..=119 => Breakpoint::Normal,
            _ => Breakpoint::Wide,
        }
    }

    /// Check if at least this breakpoint (inclusive)
    pub fn at_least(&self, min: Breakpoint) -> bool {
        *self >= min
    }

    /// Logs go to the right of the products instead of below them
    pub fn logs_beside(&self) -> bool {
        self.at_least(Breakpoint::Wide)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_thresholds() {
        assert_eq!(Breakpoint::from_width(40), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(59), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(60), Breakpoint::Normal);
        assert_eq!(Breakpoint::from_width(119), Breakpoint::Normal);
        assert_eq!(Breakpoint::from_width(120), Breakpoint::Wide);
    }

    #[test]
    fn wide_puts_logs_beside() {
        assert!(Breakpoint::Wide.logs_beside());
        assert!(!Breakpoint::Normal.logs_beside());
        assert!(Breakpoint::Normal.at_least(Breakpoint::Compact));
    }
}
