//! List or search the catalog.

use anyhow::Result;

use super::BooksArgs;
use crate::context::Context;

/// Run the books command.
pub async fn run(args: BooksArgs, ctx: &Context) -> Result<()> {
    let query = args.query()?;
    let session = ctx.session()?;

    ctx.output.header(&format!("Books: {}", query.describe()));
    let spinner = ctx.output.spinner("Loading books...");
    let result = session.browse(&query).await;
    spinner.finish_and_clear();

    ctx.output.books(&result?);
    session.close();
    Ok(())
}
