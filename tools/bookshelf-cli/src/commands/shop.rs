//! Interactive shopping loop.

use anyhow::Result;
use bookshelf_commerce::catalog::CatalogItem;
use bookshelf_commerce::checkout::CheckoutOutcome;
use bookshelf_commerce::search::{SearchKind, SearchQuery};
use bookshelf_commerce::session::StorefrontSession;
use bookshelf_commerce::ItemId;
use dialoguer::{Confirm, Input, Select};

use super::auth;
use crate::context::Context;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Browse,
    Search,
    Recommended,
    AddToCart,
    ViewCart,
    RemoveFromCart,
    Checkout,
    Profile,
    Login,
    Logout,
    Signup,
    Quit,
}

impl Action {
    fn label(&self) -> &'static str {
        match self {
            Action::Browse => "Browse all books",
            Action::Search => "Search",
            Action::Recommended => "Recommended for you",
            Action::AddToCart => "Add to cart",
            Action::ViewCart => "View cart",
            Action::RemoveFromCart => "Remove from cart",
            Action::Checkout => "Checkout",
            Action::Profile => "My profile",
            Action::Login => "Log in",
            Action::Logout => "Log out",
            Action::Signup => "Sign up",
            Action::Quit => "Quit",
        }
    }
}

/// Menu entries for the current session state.
fn menu(logged_in: bool, cart_empty: bool) -> Vec<Action> {
    let mut actions = vec![Action::Browse, Action::Search];
    if logged_in {
        actions.push(Action::Recommended);
    }
    actions.push(Action::AddToCart);
    if !cart_empty {
        actions.extend([Action::ViewCart, Action::RemoveFromCart, Action::Checkout]);
    }
    if logged_in {
        actions.extend([Action::Profile, Action::Logout]);
    } else {
        actions.extend([Action::Login, Action::Signup]);
    }
    actions.push(Action::Quit);
    actions
}

/// Run the shop command.
pub async fn run(ctx: &Context) -> Result<()> {
    let mut session = ctx.session()?;
    let mut listing: Vec<CatalogItem> = Vec::new();

    ctx.output.header("Bookshelf");
    loop {
        let actions = menu(session.username().is_some(), session.cart().is_empty());
        let labels: Vec<&str> = actions.iter().map(Action::label).collect();
        let who = session.username().unwrap_or("guest");
        let selection = Select::new()
            .with_prompt(format!("[{}] Cart ({})", who, session.cart_count()))
            .items(&labels)
            .default(0)
            .interact()?;

        let result = match actions[selection] {
            Action::Browse => show_books(&session, &SearchQuery::All, &mut listing, ctx).await,
            Action::Search => match prompt_query() {
                Ok(query) => show_books(&session, &query, &mut listing, ctx).await,
                Err(e) => Err(e),
            },
            Action::Recommended => show_recommended(&session, &mut listing, ctx).await,
            Action::AddToCart => add_to_cart(&mut session, &listing, ctx),
            Action::ViewCart => view_cart(&session, ctx).await,
            Action::RemoveFromCart => remove_from_cart(&mut session, ctx),
            Action::Checkout => checkout(&mut session, &mut listing, ctx).await,
            Action::Profile => show_profile(&session, ctx).await,
            Action::Login => match auth::prompt_login(None) {
                Ok(form) => auth::login_with(&mut session, &form, ctx).await,
                Err(e) => Err(e),
            },
            Action::Logout => {
                session.logout();
                ctx.output.success("Logged out.");
                Ok(())
            }
            Action::Signup => match auth::prompt_registration() {
                Ok(form) => auth::register_with(&session, &form, ctx).await,
                Err(e) => Err(e),
            },
            Action::Quit => {
                if !session.cart().is_empty()
                    && !Confirm::new()
                        .with_prompt("Your cart will be discarded. Quit anyway?")
                        .default(false)
                        .interact()?
                {
                    continue;
                }
                break;
            }
        };

        if let Err(e) = result {
            ctx.output.error(&format!("{:#}", e));
        }
    }

    session.close();
    Ok(())
}

fn prompt_query() -> Result<SearchQuery> {
    let labels: Vec<&str> = SearchKind::ALL.iter().map(SearchKind::display_name).collect();
    let choice = Select::new()
        .with_prompt("Search by")
        .items(&labels)
        .default(0)
        .interact()?;
    let kind = SearchKind::ALL[choice];

    let ask = |prompt: &str| -> Result<String> {
        Ok(Input::<String>::new().with_prompt(prompt).interact_text()?)
    };
    let query = match kind {
        SearchKind::Price => SearchQuery::from_input(kind, "", &ask("Min price")?, &ask("Max price")?)?,
        SearchKind::Inventory => SearchQuery::from_input(kind, "", &ask("More than")?, "")?,
        _ => SearchQuery::from_input(kind, &ask(kind.display_name())?, "", "")?,
    };
    Ok(query)
}

/// Each load is awaited while the loop holds the session, so a listing
/// can never be overtaken by a later one and no view ticket is needed.
async fn show_books(
    session: &StorefrontSession,
    query: &SearchQuery,
    listing: &mut Vec<CatalogItem>,
    ctx: &Context,
) -> Result<()> {
    ctx.output.header(&format!("Books: {}", query.describe()));

    let spinner = ctx.output.spinner("Loading books...");
    let result = session.browse(query).await;
    spinner.finish_and_clear();
    let books = result?;

    ctx.output.books(&books);
    *listing = books;
    Ok(())
}

async fn show_recommended(
    session: &StorefrontSession,
    listing: &mut Vec<CatalogItem>,
    ctx: &Context,
) -> Result<()> {
    ctx.output.header("Recommended for you");

    let spinner = ctx.output.spinner("Loading recommendations...");
    let result = session.recommended().await;
    spinner.finish_and_clear();
    let books = result?;

    if books.is_empty() && !ctx.output.is_json() {
        ctx.output
            .info("No recommendations yet. Buy a few books and check back.");
        return Ok(());
    }
    ctx.output.books(&books);
    *listing = books;
    Ok(())
}

async fn show_profile(session: &StorefrontSession, ctx: &Context) -> Result<()> {
    ctx.output.header("My profile");

    let spinner = ctx.output.spinner("Loading profile...");
    let result = session.profile().await;
    spinner.finish_and_clear();

    ctx.output.profile(&result?);
    Ok(())
}

fn add_to_cart(
    session: &mut StorefrontSession,
    listing: &[CatalogItem],
    ctx: &Context,
) -> Result<()> {
    let (id, title) = if listing.is_empty() {
        let id: String = Input::new().with_prompt("Book id").interact_text()?;
        (ItemId::new(id.trim()), None)
    } else {
        let labels: Vec<String> = listing
            .iter()
            .map(|b| format!("{} by {} ({})", b.title, b.author_display(), b.price.display()))
            .collect();
        let choice = Select::new()
            .with_prompt("Add which book?")
            .items(&labels)
            .default(0)
            .interact()?;
        let book = &listing[choice];
        (book.id.clone(), Some(book.title.clone()))
    };

    let quantity = session.add_to_cart(id.clone());
    let name = title.unwrap_or_else(|| id.to_string());
    ctx.output
        .success(&format!("Added {} to cart (now {} in cart).", name, quantity));
    Ok(())
}

async fn view_cart(session: &StorefrontSession, ctx: &Context) -> Result<()> {
    ctx.output.header("Your cart");

    let spinner = ctx.output.spinner("Loading cart...");
    let result = session.view_cart().await;
    spinner.finish_and_clear();

    ctx.output.cart(&result?);
    Ok(())
}

fn remove_from_cart(session: &mut StorefrontSession, ctx: &Context) -> Result<()> {
    let ids: Vec<ItemId> = session.cart().lines().iter().map(|l| l.item_id.clone()).collect();
    let labels: Vec<String> = session
        .cart()
        .lines()
        .iter()
        .map(|l| format!("{} (x{})", l.item_id, l.quantity))
        .collect();
    let choice = Select::new()
        .with_prompt("Remove which book?")
        .items(&labels)
        .default(0)
        .interact()?;

    if session.remove_from_cart(&ids[choice]) {
        ctx.output.success("Removed from cart.");
    }
    Ok(())
}

/// Place the order. A successful order changes stock levels, so the
/// catalog listing is reloaded afterwards.
async fn checkout(
    session: &mut StorefrontSession,
    listing: &mut Vec<CatalogItem>,
    ctx: &Context,
) -> Result<()> {
    let spinner = ctx.output.spinner("Placing order...");
    let outcome = session.checkout().await;
    spinner.finish_and_clear();

    let reload = after_checkout(outcome)?;
    ctx.output.success("Checkout successful!");
    show_books(session, &reload, listing, ctx).await
}

/// The listing to show after an order went through, or the failure reason.
fn after_checkout(outcome: CheckoutOutcome) -> Result<SearchQuery> {
    match outcome {
        CheckoutOutcome::Success => Ok(SearchQuery::All),
        CheckoutOutcome::Failure(reason) => anyhow::bail!("{}", reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_hides_cart_actions_when_empty() {
        let actions = menu(false, true);
        assert!(!actions.contains(&Action::Checkout));
        assert!(actions.contains(&Action::Login));
        assert_eq!(actions.last(), Some(&Action::Quit));
    }

    #[test]
    fn test_menu_when_logged_in_with_items() {
        let actions = menu(true, false);
        assert!(actions.contains(&Action::Checkout));
        assert!(actions.contains(&Action::Logout));
        assert!(!actions.contains(&Action::Signup));
    }

    #[test]
    fn test_recommendations_need_login() {
        assert!(!menu(false, false).contains(&Action::Recommended));
        assert!(!menu(false, true).contains(&Action::Profile));

        let actions = menu(true, true);
        assert!(actions.contains(&Action::Recommended));
        assert!(actions.contains(&Action::Profile));
        assert_eq!(actions[..3], [Action::Browse, Action::Search, Action::Recommended]);
    }

    #[test]
    fn test_successful_checkout_reloads_full_catalog() {
        assert_eq!(after_checkout(CheckoutOutcome::Success).unwrap(), SearchQuery::All);

        let err = after_checkout(CheckoutOutcome::Failure("Checkout failed (HTTP 500).".into()))
            .unwrap_err();
        assert_eq!(err.to_string(), "Checkout failed (HTTP 500).");
    }
}
