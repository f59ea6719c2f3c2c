//! The command line interface for the spendlog expense ledger.

use std::{fs, path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use spendlog::{
    Error, Ledger, Priority, SortOption,
    currency::format_amount,
    export::{SaveToPath, export_and_share},
    import::import_csv,
    sorted_view,
    store::FileStore,
};

/// Track personal expenses from the command line.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding the expense data files.
    #[arg(long, default_value = ".spendlog")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a new expense.
    Add {
        /// What the money was spent on.
        title: String,
        /// How much money was spent.
        amount: String,
        /// How urgently the expense needs to be paid.
        #[arg(short, long, default_value = "LOW")]
        priority: Priority,
    },
    /// List expenses and the running total.
    List {
        /// The view ordering: none, priority-urgent-low, priority-low-urgent,
        /// price-low-high, price-high-low, date-newest or date-oldest.
        #[arg(short, long, default_value = "none")]
        sort: SortOption,
    },
    /// Change the title, amount and priority of an expense.
    Edit {
        /// The id of the expense to change.
        id: String,
        /// The new title.
        title: String,
        /// The new amount.
        amount: String,
        /// The new priority.
        #[arg(short, long, default_value = "LOW")]
        priority: Priority,
    },
    /// Delete an expense.
    Remove {
        /// The id of the expense to delete.
        id: String,
    },
    /// Show the running total.
    Total,
    /// Import expenses from a CSV file.
    Import {
        /// The CSV file to read.
        file: PathBuf,
    },
    /// Export all expenses to a CSV file.
    Export {
        /// Where to write the CSV file.
        out: PathBuf,
    },
    /// Show or set the author name stamped on new expenses.
    Author {
        /// The name to use from now on; omit to print the current name.
        name: Option<String>,
    },
}

fn main() -> ExitCode {
    setup_logging();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Error> {
    let store = FileStore::new(&args.data_dir)?;
    let mut ledger = Ledger::load(store);

    match args.command {
        Command::Add {
            title,
            amount,
            priority,
        } => {
            let record = ledger.create(&title, &amount, priority)?;
            println!(
                "Added expense {}: {} {}",
                record.id,
                record.title,
                format_amount(record.amount)
            );
        }
        Command::List { sort } => print_listing(&ledger, sort),
        Command::Edit {
            id,
            title,
            amount,
            priority,
        } => ledger.update(&id, &title, &amount, priority)?,
        Command::Remove { id } => ledger.delete(&id)?,
        Command::Total => println!("Total: {}", format_amount(ledger.total())),
        Command::Import { file } => {
            let text = fs::read_to_string(&file)?;
            let imported = import_csv(&mut ledger, &text)?;
            println!("Imported {imported} expenses.");
        }
        Command::Export { out } => {
            export_and_share(ledger.records(), &SaveToPath::new(&out))?;
            println!("Exported {} expenses to {}.", ledger.records().len(), out.display());
        }
        Command::Author { name } => match name {
            Some(name) => ledger.set_author(&name)?,
            None => println!("{}", ledger.author()),
        },
    }

    Ok(())
}

fn print_listing(ledger: &Ledger<FileStore>, sort: SortOption) {
    let records = sorted_view(ledger.records(), sort);

    for record in records.iter().filter(|record| record.is_displayable()) {
        println!(
            "{:>4}  {}  {:<6}  {:<30}  {:>12}",
            record.id,
            record.date,
            record.priority.to_string(),
            record.title,
            format_amount(record.amount)
        );
    }

    println!("Total: {}", format_amount(ledger.total()));
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(filter))
        .init();
}
