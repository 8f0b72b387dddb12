use crate::output::is_quiet;
use crate::ui::{paint, Icons, Tone};
use crate::{Company, Location};

pub fn header(text: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", Icons::ROCKET, paint(text, Tone::Heading));
}

pub fn serving(url: &str) {
    if is_quiet() {
        return;
    }
    println!("{} Server running at {}", Icons::GLOBE, paint(url, Tone::Link));
}

pub fn success(label: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", Icons::CHECK, paint(label, Tone::Good));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, paint(label, Tone::Bad));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, paint(label, Tone::Caution));
}

pub fn info(label: &str, value: &str) {
    println!(
        "{} {}: {}",
        paint(Icons::INFO, Tone::Link),
        paint(label, Tone::Label),
        value
    );
}

pub fn section(title: &str) {
    println!();
    println!("━{}━", paint(title, Tone::Heading));
}

pub fn summary_row(label: &str, value: &str) {
    println!("  {} {}", paint(label, Tone::Label), value);
}

pub fn company(company: &Company) {
    println!(
        "{} [{}] {}",
        Icons::BUILDING,
        company.company_id,
        paint(&company.name, Tone::Heading)
    );
    summary_row("Address:", &company.address);
    summary_row("Coordinates:", &company.coordinate().to_string());
}

pub fn location(location: &Location) {
    println!(
        "{} [{}] {}",
        Icons::PIN,
        location.location_id,
        paint(&location.name, Tone::Heading)
    );
    summary_row("Address:", &location.address);
    summary_row("Coordinates:", &location.coordinate().to_string());
}

pub fn empty(label: &str) {
    println!("{} {}", Icons::EMPTY, paint(label, Tone::Faint));
}
