//! Placemark description blocks
//!
//! A description is a small HTML fragment listing every field the record
//! actually has, one `<b>Label:</b> value<br/>` line each. Absent fields are
//! left out entirely. Values are HTML-escaped; the writer then escapes the
//! whole fragment again as XML character data.

use domain::{FerryRoute, TrafficEvent};

use crate::escape::html_text;

/// Line-oriented builder for a description fragment
#[derive(Debug, Clone, Default)]
pub struct DescriptionBuilder {
    lines: Vec<String>,
}

impl DescriptionBuilder {
    /// Start a description with a heading
    #[must_use]
    pub fn new(heading: &str) -> Self {
        Self {
            lines: vec![format!("<h3>{}</h3>", html_text(heading))],
        }
    }

    /// Add a labelled line when the value is present
    #[must_use]
    pub fn field(mut self, label: &str, value: Option<&str>) -> Self {
        if let Some(value) = value {
            self.lines
                .push(format!("<b>{label}:</b> {}<br/>", html_text(value)));
        }
        self
    }

    /// Add a labelled link line when the URL is present
    #[must_use]
    pub fn link(mut self, label: &str, url: Option<&str>, text: &str) -> Self {
        if let Some(url) = url {
            self.lines.push(format!(
                "<b>{label}:</b> <a href=\"{}\">{}</a><br/>",
                html_text(url),
                html_text(text)
            ));
        }
        self
    }

    /// Add a trailing free-text section when present
    #[must_use]
    pub fn section(mut self, label: &str, body: Option<&str>) -> Self {
        if let Some(body) = body {
            self.lines.push("<hr/>".to_string());
            self.lines.push(format!("<b>{label}:</b><br/>"));
            self.lines.push(html_text(body));
        }
        self
    }

    /// Render the fragment, one element per line
    #[must_use]
    pub fn render(self) -> String {
        self.lines.join("\n")
    }
}

/// Description block for a traffic event
#[must_use]
pub fn event_description(event: &TrafficEvent) -> String {
    let severity = event.severity.as_ref().map(ToString::to_string);
    let closed = event.closed.map(|c| if c { "Yes" } else { "No" });

    DescriptionBuilder::new("Traffic Event Details")
        .field("Event ID", Some(&event.id))
        .field("Event Type", Some(event.event_type_label()))
        .field("Sub Type", event.event_sub_type.as_deref())
        .field("Severity/Incident Level", severity.as_deref())
        .field("Status", event.status.as_deref())
        .field("Direction", event.direction.as_deref())
        .field("Route", event.route.as_deref())
        .field("Location", event.location_description.as_deref())
        .field("Closest Landmark", event.landmark.as_deref())
        .field("Start Time", event.schedule.start.as_deref())
        .field("End Time", event.schedule.end.as_deref())
        .field("Last Updated", event.schedule.last_updated.as_deref())
        .field("Next Update", event.schedule.next_update.as_deref())
        .field("Closed", closed)
        .section("Full Description", event.description.as_deref())
        .render()
}

/// Description block for a ferry route
#[must_use]
pub fn ferry_description(ferry: &FerryRoute) -> String {
    let vehicles = ferry.capacity.vehicles.map(|v| v.to_string());
    let passengers = ferry.capacity.passengers.map(|p| p.to_string());
    let crossing = ferry.crossing_time_minutes.map(|m| format!("{m} minutes"));

    DescriptionBuilder::new("Ferry Route Details")
        .field("Name", Some(&ferry.name))
        .field("Type", Some(ferry.ferry_type_label()))
        .field("Vehicle Capacity", vehicles.as_deref())
        .field("Passenger Capacity", passengers.as_deref())
        .field("Crossing Time", crossing.as_deref())
        .field("Schedule", ferry.schedule.as_deref())
        .field("Phone", ferry.contact.phone.as_deref())
        .field("Email", ferry.contact.email.as_deref())
        .link("Webcam", ferry.webcam_url.as_deref(), "View webcam")
        .render()
}
