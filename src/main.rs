use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use uuid::Uuid;

use order_history::application::invoice_view::DEFAULT_PAGE_SIZE;
use order_history::domain::order::{Order, OrderStatus};
use order_history::{build_screen, AppError, Config, InvoicePage, StatusFilter};

/// Browse the invoice history held by the order service.
#[derive(Parser)]
#[command(name = "order_history", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List invoices, optionally filtered by status
    List {
        /// Status to filter on (PENDING, PAID, ...); all statuses when omitted
        #[arg(short, long)]
        status: Option<OrderStatus>,

        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Invoices per page (5, 10 or 20)
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,
    },

    /// Show one invoice with its line items
    Show { id: Uuid },

    /// Download the PDF quote of an invoice
    Quote { id: Uuid },

    /// Delete a pending invoice
    Delete {
        id: Uuid,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let mut screen = build_screen(&config)?;

    log::info!("Using order service at {}", config.service_url);

    match cli.command {
        Commands::List {
            status,
            page,
            page_size,
        } => {
            screen.refresh().await?;
            if let Some(status) = status {
                screen.set_filter(StatusFilter::Only(status));
            }
            screen.set_page_size(page_size)?;
            screen.go_to_page(page)?;
            screen.with_page(print_page);
        }
        Commands::Show { id } => {
            let order = screen.open_invoice(id).await?;
            print_order(&order);
        }
        Commands::Quote { id } => {
            let doc = screen.download_quote(id).await?;
            let path = config.quote_dir.join(doc.file_name());
            tokio::fs::write(&path, &doc.bytes).await?;
            println!("Saved quote to {}", path.display());
        }
        Commands::Delete { id, yes } => {
            screen.refresh().await?;
            screen.open_invoice(id).await?;
            if !screen.request_delete() {
                println!("Invoice {} cannot be deleted (only PENDING invoices can)", id);
                return Ok(());
            }
            if !yes {
                screen.cancel_delete();
                println!("Re-run with --yes to delete invoice {}", id);
                return Ok(());
            }
            if let Some(deleted) = screen.confirm_delete().await? {
                println!("Deleted invoice {}", deleted);
            }
        }
    }

    Ok(())
}

fn print_page(page: &InvoicePage<'_>) {
    let tabs: Vec<String> = page
        .tabs
        .iter()
        .map(|tab| match tab {
            StatusFilter::All => format!("ALL ({})", page.counts.values().sum::<usize>()),
            StatusFilter::Only(status) => {
                format!("{} ({})", status, page.counts.get(status).copied().unwrap_or(0))
            }
        })
        .collect();
    println!("{}", tabs.join(" | "));
    println!(
        "Filter {} - page {}/{} ({} invoices)",
        page.filter, page.page, page.total_pages, page.filtered_total
    );
    for order in &page.items {
        println!(
            "{}  {}  {:<10}  {:>10}  {} item(s)  {}",
            order.id,
            order.created_at.format("%Y-%m-%d"),
            order.status,
            order.total_amount.to_string(),
            order.item_count,
            order.customer_name
        );
    }
}

fn print_order(order: &Order) {
    println!("Invoice {} ({})", order.id, order.status);
    println!("Customer: {}", order.customer_name);
    println!("Created:  {}", order.created_at.to_rfc3339());
    for line in &order.lines {
        println!(
            "  {} x {} @ {}",
            line.quantity, line.product_name, line.unit_price
        );
    }
    println!("Total:    {}", order.total_amount);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_parses_known_status() {
        let cli = Cli::try_parse_from(["order_history", "list", "--status", "shipped"])
            .expect("valid arguments");
        assert!(matches!(
            cli.command,
            Commands::List {
                status: Some(OrderStatus::Shipped),
                ..
            }
        ));
    }

    #[test]
    fn list_rejects_unknown_status() {
        let result = Cli::try_parse_from(["order_history", "list", "--status", "bogus"]);
        assert!(result.is_err());
    }
}
