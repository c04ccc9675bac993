use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::process::ExitCode;

use clap::Parser;

use ticket_shuffler::{read_records, ShuffleError, TicketAssigner, TicketAssignment};

#[derive(Parser, Debug)]
#[command(
    name = "shuffler",
    about = "Takes a file with student data, a number of tickets and a \
             distribution parameter, and prints each student's ticket number"
)]
struct Args {
    /// File containing the list of students, one per line, fields
    /// separated by whitespace
    #[arg(short, long)]
    file: String,

    /// Number of tickets
    #[arg(short = 'n', long)]
    numbilets: u64,

    /// Parameter that changes the distribution
    #[arg(short, long, allow_negative_numbers = true)]
    parameter: i64,

    /// Hash across this many worker threads (output order is unchanged)
    #[arg(long, default_value_t = 1)]
    threads: usize,

    /// Emit the assignment as a JSON array instead of plain lines
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn run(args: &Args) -> Result<(), ShuffleError> {
    // Validate configuration and decode the whole input before hashing:
    // nothing is printed unless every record gets a ticket.
    let assigner = TicketAssigner::new(args.numbilets, args.parameter)?;
    let records = read_records(BufReader::new(File::open(&args.file)?))?;

    let assignments = if args.threads > 1 {
        assigner.assign_tickets_par(records, args.threads)
    } else {
        assigner.assign_tickets(records)
    };

    let mut out = BufWriter::new(std::io::stdout().lock());
    if args.json {
        serde_json::to_writer_pretty(&mut out, &assignments)
            .map_err(|e| ShuffleError::Io(e.into()))?;
        writeln!(out)?;
    } else {
        for TicketAssignment { record, ticket } in &assignments {
            let mut cols: Vec<&str> = record.fields.iter().map(String::as_str).collect();
            let ticket = ticket.to_string();
            cols.push(&ticket);
            writeln!(out, "{}", cols.join(" "))?;
        }
    }
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("shuffler: {e}");
            ExitCode::FAILURE
        }
    }
}
