use chrono::NaiveDateTime;
use qrseal_canonical::ValidationError;

const ICAL_DATETIME: &str = "%Y%m%dT%H%M%S";

/// Unsigned QR content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// A URL or any other single line of text.
    Link(String),
    /// A vCard 3.0 contact.
    Contact(Contact),
    /// A vCalendar 2.0 event.
    Event(Event),
}

impl Content {
    /// Text to place in the QR code.
    pub fn to_text(&self) -> Result<String, ValidationError> {
        match self {
            Content::Link(url) => {
                let url = url.trim();
                if url.is_empty() {
                    return Err(ValidationError::EmptyField { field: "link" });
                }
                Ok(url.to_string())
            }
            Content::Contact(contact) => contact.to_vcard(),
            Content::Event(event) => event.to_vcalendar(),
        }
    }
}

/// Contact card fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contact {
    /// Display name. Required.
    pub name: String,
    /// International phone number; also used for a WhatsApp link.
    pub phone: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Postal address, free text.
    pub address: Option<String>,
    /// Map link for the address.
    pub maps_url: Option<String>,
}

impl Contact {
    /// Renders the contact as a vCard 3.0 document.
    pub fn to_vcard(&self) -> Result<String, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyField { field: "name" });
        }
        let name = escape(name);

        let mut card = String::from("BEGIN:VCARD\nVERSION:3.0\n");
        card.push_str(&format!("N:{name}\nFN:{name}\n"));
        if let Some(phone) = present(&self.phone) {
            let digits = phone_digits(phone)?;
            card.push_str(&format!("TEL:+{digits}\nURL:https://wa.me/{digits}\n"));
        }
        if let Some(email) = present(&self.email) {
            card.push_str(&format!("EMAIL:{}\n", escape(email)));
        }
        if let Some(address) = present(&self.address) {
            card.push_str(&format!("ADR:;;{};;;;\n", escape(address)));
        }
        if let Some(maps_url) = present(&self.maps_url) {
            card.push_str(&format!("URL:{maps_url}\n"));
        }
        card.push_str("END:VCARD");
        Ok(card)
    }
}

/// Calendar event fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Event {
    /// Summary line. Required.
    pub title: String,
    /// Floating local start time.
    pub start: Option<NaiveDateTime>,
    /// Floating local end time.
    pub end: Option<NaiveDateTime>,
    /// Where the event takes place.
    pub location: Option<String>,
    /// Longer description.
    pub description: Option<String>,
}

impl Event {
    /// Renders the event as a single-VEVENT vCalendar 2.0 document.
    pub fn to_vcalendar(&self) -> Result<String, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyField { field: "title" });
        }
        if let (Some(start), Some(end)) = (self.start, self.end) {
            if end < start {
                return Err(ValidationError::OutOfBounds {
                    field: "end",
                    value: end.format(ICAL_DATETIME).to_string(),
                });
            }
        }

        let mut text = String::from("BEGIN:VCALENDAR\nVERSION:2.0\nBEGIN:VEVENT\n");
        text.push_str(&format!("SUMMARY:{}\n", escape(title)));
        if let Some(start) = self.start {
            text.push_str(&format!("DTSTART:{}\n", start.format(ICAL_DATETIME)));
        }
        if let Some(end) = self.end {
            text.push_str(&format!("DTEND:{}\n", end.format(ICAL_DATETIME)));
        }
        if let Some(location) = present(&self.location) {
            text.push_str(&format!("LOCATION:{}\n", escape(location)));
        }
        if let Some(description) = present(&self.description) {
            text.push_str(&format!("DESCRIPTION:{}\n", escape(description)));
        }
        text.push_str("END:VEVENT\nEND:VCALENDAR");
        Ok(text)
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Strips `+`, spaces and dashes; what remains must be 8 to 15 digits.
fn phone_digits(phone: &str) -> Result<String, ValidationError> {
    let digits: String = phone
        .chars()
        .filter(|c| !matches!(c, '+' | ' ' | '-'))
        .collect();
    if !(8..=15).contains(&digits.len()) || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::PatternMismatch {
            field: "phone",
            value: phone.to_string(),
        });
    }
    Ok(digits)
}

/// Text-value escaping shared by vCard and iCalendar.
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_structural_characters() {
        assert_eq!(escape("a;b,c\\d\r\ne"), "a\\;b\\,c\\\\d\\ne");
    }

    #[test]
    fn phone_digits_accepts_common_spellings() {
        assert_eq!(phone_digits("+62 812-3456-789").unwrap(), "628123456789");
        assert!(phone_digits("0812").is_err());
        assert!(phone_digits("62812abc4567").is_err());
    }
}
