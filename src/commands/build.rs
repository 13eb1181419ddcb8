//! Build the static site

use anyhow::Result;

use crate::generator::Generator;
use crate::Folio;

pub async fn run(folio: &Folio) -> Result<()> {
    let start = std::time::Instant::now();

    let source = folio.document_source();
    let likes = folio.like_store();
    if !likes.is_configured() {
        tracing::info!("No like database configured, cards show front-matter counts");
    }

    Generator::new(folio)
        .generate(source.as_ref(), &likes)
        .await?;

    tracing::info!("Generated in {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}
