//! Contact form helper: turns a submission into a `mailto:` link

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left alone by `encodeURIComponent`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, URI_COMPONENT).to_string()
}

/// Build the mail-client link for a contact form submission
pub fn mailto_link(to: &str, name: &str, email: &str, message: &str) -> String {
    let subject = format!("Portfolio Contact from {}", name);
    let body = format!("Name: {}\nEmail: {}\n\nMessage:\n{}", name, email, message);
    format!(
        "mailto:{}?subject={}&body={}",
        to,
        encode_component(&subject),
        encode_component(&body)
    )
}
