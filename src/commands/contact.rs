//! Print the mail-client link for a contact message

use anyhow::Result;

use crate::contact::mailto_link;
use crate::Folio;

pub fn run(folio: &Folio, name: &str, email: &str, message: &str) -> Result<()> {
    let to = &folio.config.contact.email;
    if to.is_empty() {
        anyhow::bail!("No contact.email set in _config.yml");
    }

    println!("{}", mailto_link(to, name, email, message));
    Ok(())
}
