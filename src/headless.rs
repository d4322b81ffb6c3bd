// Headless mode - one-shot commands that print to stdout
//
// `list` resolves a single page (ids, count, details) and prints it as text;
// `fields` prints the distinct values the service reports for a field.
// Logs go to stderr so stdout stays clean for piping.

use crate::api::models::{Field, ProductId};
use crate::api::ApiClient;
use crate::catalog::filter_form::FilterForm;
use crate::catalog::{ApplyOutcome, CatalogController};
use crate::cli::ListArgs;
use crate::config::Config;
use crate::tui::components::pagination_bar::page_label;
use anyhow::{bail, Context, Result};
use std::io::{self, Write};

/// Print one page of the catalog
pub async fn run_list(config: &Config, client: &ApiClient, args: &ListArgs) -> Result<()> {
    let mut controller = prepare(config, client, args).await?;

    let outcome = controller
        .load(client, config.catalog.detail_concurrency)
        .await;
    if outcome != ApplyOutcome::Applied {
        bail!("Failed to load page {}", args.page);
    }

    let stdout = io::stdout();
    print_page(&mut stdout.lock(), &controller).context("Failed to write output")
}

/// Print the distinct non-null values of `field`, or the field names
pub async fn run_fields(client: &ApiClient, field: Option<Field>) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let Some(field) = field else {
        let names = client
            .get_field_names()
            .await
            .context("Failed to fetch field names")?;
        for name in names {
            writeln!(out, "{}", name)?;
        }
        return Ok(());
    };

    let values = client
        .get_fields(field)
        .await
        .with_context(|| format!("Failed to fetch values for '{}'", field))?;

    let mut form = FilterForm::new();
    form.set_field_values(field, &values);
    for value in form.options() {
        writeln!(out, "{}", value)?;
    }
    Ok(())
}

/// Build the controller for `args`: filter applied, requested page selected
///
/// Moving past page 1 needs the page count, so the count request is issued
/// up front when a later page is asked for.
async fn prepare(config: &Config, client: &ApiClient, args: &ListArgs) -> Result<CatalogController> {
    let mut controller =
        CatalogController::new(config.catalog.page_size, config.catalog.count_strategy);

    let criteria = filter_form(args).submit()?;
    if !criteria.is_empty() {
        controller.on_filter_change(criteria);
    }

    if args.page > 1 {
        let ticket = controller.ticket();
        let count = client
            .call::<Vec<ProductId>>(&controller.count_request())
            .await
            .context("Failed to fetch total product count")?;
        controller.apply_count(ticket, Ok(count));

        let total = controller.pagination().total_pages();
        if controller.on_page_change(args.page).is_none() {
            bail!("Page {} is out of range (1-{})", args.page, total.max(1));
        }
    } else if args.page == 0 {
        bail!("Pages start at 1");
    }

    Ok(controller)
}

/// A form whose draft holds the filters given on the command line
fn filter_form(args: &ListArgs) -> FilterForm {
    let mut form = FilterForm::new();
    let inputs = [
        (Field::Product, &args.product),
        (Field::Price, &args.price),
        (Field::Brand, &args.brand),
    ];
    for (field, value) in inputs {
        if let Some(text) = value {
            form.set_input(field, text.as_str());
        }
    }
    form
}

/// Cards separated by blank lines, then the page indicator
fn print_page(out: &mut impl Write, controller: &CatalogController) -> io::Result<()> {
    let products = controller.products();
    if products.is_empty() {
        writeln!(out, "Товары не найдены")?;
    }
    for slot in products {
        for line in slot.display_lines() {
            writeln!(out, "{}", line)?;
        }
        writeln!(out)?;
    }
    writeln!(out, "{}", page_label(controller.pagination()))
}
