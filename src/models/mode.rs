/// Which operation the next button press runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Fill,
    Clear,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Fill  => "Fill Disk",
            Mode::Clear => "Clear Disk",
        }
    }

    /// Mode after this one succeeds.
    pub fn next(&self) -> Self {
        match self {
            Mode::Fill  => Mode::Clear,
            Mode::Clear => Mode::Fill,
        }
    }
}
