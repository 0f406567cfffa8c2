use console::Style;
use rosterapp::commands::MessageLevel;
use rosterapp::model::Status;

pub fn header() -> Style {
    Style::new().bold().underlined()
}

pub fn title() -> Style {
    Style::new().bold().cyan()
}

pub fn dim() -> Style {
    Style::new().dim()
}

pub fn total() -> Style {
    Style::new().bold()
}

pub fn bar() -> Style {
    Style::new().blue()
}

pub fn status(status: Status) -> Style {
    match status {
        Status::Active => Style::new().green(),
        Status::Inactive => Style::new().red(),
    }
}

pub fn message(level: MessageLevel) -> Style {
    match level {
        MessageLevel::Info => Style::new().dim(),
        MessageLevel::Success => Style::new().green(),
        MessageLevel::Warning => Style::new().yellow(),
    }
}
