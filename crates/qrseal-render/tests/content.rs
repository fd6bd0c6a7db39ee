use chrono::NaiveDate;
use qrseal_canonical::ValidationError;
use qrseal_render::{Contact, Content, Event};

#[test]
fn link_is_trimmed_and_required() {
    assert_eq!(
        Content::Link("  https://example.org/a?b=c  ".into()).to_text().unwrap(),
        "https://example.org/a?b=c"
    );
    assert_eq!(
        Content::Link("   ".into()).to_text(),
        Err(ValidationError::EmptyField { field: "link" })
    );
}

#[test]
fn full_contact_card() {
    let contact = Contact {
        name: "Budi Santoso".into(),
        phone: Some("+62 812-3456-7890".into()),
        email: Some("budi@example.org".into()),
        address: Some("Jl. Merdeka 1\nJakarta".into()),
        maps_url: Some("https://maps.example.org/?q=1".into()),
    };
    assert_eq!(
        Content::Contact(contact).to_text().unwrap(),
        "BEGIN:VCARD\n\
         VERSION:3.0\n\
         N:Budi Santoso\n\
         FN:Budi Santoso\n\
         TEL:+6281234567890\n\
         URL:https://wa.me/6281234567890\n\
         EMAIL:budi@example.org\n\
         ADR:;;Jl. Merdeka 1\\nJakarta;;;;\n\
         URL:https://maps.example.org/?q=1\n\
         END:VCARD"
    );
}

#[test]
fn contact_with_name_only() {
    let contact = Contact {
        name: "Ani".into(),
        phone: Some("  ".into()),
        ..Contact::default()
    };
    assert_eq!(
        contact.to_vcard().unwrap(),
        "BEGIN:VCARD\nVERSION:3.0\nN:Ani\nFN:Ani\nEND:VCARD"
    );
}

#[test]
fn contact_rejects_missing_name_and_bad_phone() {
    assert_eq!(
        Contact::default().to_vcard(),
        Err(ValidationError::EmptyField { field: "name" })
    );
    let bad_phone = Contact {
        name: "Ani".into(),
        phone: Some("call me".into()),
        ..Contact::default()
    };
    assert!(matches!(
        bad_phone.to_vcard(),
        Err(ValidationError::PatternMismatch { field: "phone", .. })
    ));
}

#[test]
fn full_event() {
    let day = NaiveDate::from_ymd_opt(2025, 8, 17).unwrap();
    let event = Event {
        title: "Upacara, HUT RI".into(),
        start: day.and_hms_opt(7, 30, 0),
        end: day.and_hms_opt(9, 0, 0),
        location: Some("Lapangan Merdeka".into()),
        description: Some("Bawa topi; datang awal".into()),
    };
    assert_eq!(
        Content::Event(event).to_text().unwrap(),
        "BEGIN:VCALENDAR\n\
         VERSION:2.0\n\
         BEGIN:VEVENT\n\
         SUMMARY:Upacara\\, HUT RI\n\
         DTSTART:20250817T073000\n\
         DTEND:20250817T090000\n\
         LOCATION:Lapangan Merdeka\n\
         DESCRIPTION:Bawa topi\\; datang awal\n\
         END:VEVENT\n\
         END:VCALENDAR"
    );
}

#[test]
fn event_requires_title_and_ordered_times() {
    assert_eq!(
        Event::default().to_vcalendar(),
        Err(ValidationError::EmptyField { field: "title" })
    );
    let day = NaiveDate::from_ymd_opt(2025, 8, 17).unwrap();
    let backwards = Event {
        title: "x".into(),
        start: day.and_hms_opt(10, 0, 0),
        end: day.and_hms_opt(9, 0, 0),
        ..Event::default()
    };
    assert!(matches!(
        backwards.to_vcalendar(),
        Err(ValidationError::OutOfBounds { field: "end", .. })
    ));
}
