use std::{fs::File, io::Write, time::Instant};

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use ticket_shuffler::eval::{chi_square_uniform, divergence, ticket_histogram, wilson_lower_bound};
use ticket_shuffler::types::tickets;
use ticket_shuffler::{StudentRecord, TicketAssigner};

#[derive(Parser, Debug)]
#[command(
    name = "sweep",
    about = "Distribution sweep: uniformity, parameter divergence and \
             single-character sensitivity over a synthetic roster"
)]
struct Args {
    // roster
    #[arg(long, default_value_t = 5000)]
    students: usize,
    #[arg(long, default_value_t = 100)]
    numbilets: u64,
    #[arg(long, default_value_t = 42)]
    seed_roster: u64,

    // parameters to compare, comma-separated
    #[arg(long, default_value = "42,43,2026", allow_hyphen_values = true)]
    parameters: String,

    // sensitivity
    #[arg(long, default_value_t = 1000)]
    flips: usize,
    #[arg(long, default_value_t = 7)]
    seed_flips: u64,

    #[arg(long, default_value_t = 1)]
    threads: usize,

    // outputs
    #[arg(long)]
    csv: Option<String>,
    #[arg(long, default_value_t = 0.90)]
    target_lb: f64,
    #[arg(long, default_value_t = false)]
    enforce: bool,
}

fn parse_list(s: &str) -> Vec<i64> {
    s.split(',')
        .map(|x| x.trim().parse::<i64>().expect("parameter list"))
        .collect()
}

fn random_name(rng: &mut StdRng, len: usize) -> String {
    (0..len).map(|_| (b'a' + rng.gen_range(0..26u8)) as char).collect()
}

fn roster(rng: &mut StdRng, n: usize) -> Vec<StudentRecord> {
    (0..n)
        .map(|_| {
            StudentRecord::new(vec![
                random_name(rng, 8),
                random_name(rng, 6),
                format!("G{}", rng.gen_range(1..13)),
            ])
        })
        .collect()
}

fn main() {
    let args = Args::parse();
    let params = parse_list(&args.parameters);
    assert!(!params.is_empty(), "need at least one parameter");

    let mut rng = StdRng::seed_from_u64(args.seed_roster);
    let records = roster(&mut rng, args.students);

    let mut csv = args.csv.as_ref().map(|p| {
        let mut f = File::create(p).expect("create csv");
        writeln!(f, "parameter,chi2,df,elapsed_ms").expect("csv header");
        f
    });

    // Uniformity per parameter.
    let mut ticket_vecs = Vec::with_capacity(params.len());
    for &p in &params {
        let assigner = TicketAssigner::new(args.numbilets, p).expect("config");
        let t0 = Instant::now();
        let out = assigner.assign_tickets_par(records.clone(), args.threads);
        let elapsed = t0.elapsed().as_millis();
        let chi2 = chi_square_uniform(&ticket_histogram(&out, args.numbilets));
        let df = args.numbilets - 1;
        println!(
            "parameter={p} chi2={chi2:.1} (df={df}) students={} elapsed={elapsed}ms",
            args.students
        );
        if let Some(f) = csv.as_mut() {
            writeln!(f, "{p},{chi2:.3},{df},{elapsed}").expect("csv row");
        }
        ticket_vecs.push((p, tickets(&out)));
    }

    // Pairwise divergence: distinct parameters should reshuffle ~all positions.
    let mut min_div = 1.0f64;
    for i in 0..ticket_vecs.len() {
        for j in (i + 1)..ticket_vecs.len() {
            let (pa, ta) = &ticket_vecs[i];
            let (pb, tb) = &ticket_vecs[j];
            let d = divergence(ta, tb);
            min_div = min_div.min(d);
            println!("divergence({pa}, {pb})={d:.4}");
        }
    }

    // Sensitivity: flip one character in a random record, count moved tickets.
    let assigner = TicketAssigner::new(args.numbilets, params[0]).expect("config");
    let mut flip_rng = StdRng::seed_from_u64(args.seed_flips);
    let mut moved = 0usize;
    for _ in 0..args.flips {
        let r = &records[flip_rng.gen_range(0..records.len())];
        let field = flip_rng.gen_range(0..r.len());
        let mut fields = r.fields.clone();
        let pos = flip_rng.gen_range(0..fields[field].len());
        let mut bytes = fields[field].clone().into_bytes();
        bytes[pos] = if bytes[pos] == b'x' { b'y' } else { b'x' };
        fields[field] = String::from_utf8(bytes).expect("ascii flip");
        let mutated = StudentRecord::new(fields);
        if assigner.ticket_for(r) != assigner.ticket_for(&mutated) {
            moved += 1;
        }
    }
    let lb = wilson_lower_bound(moved, args.flips, 1.96);
    println!("sensitivity moved={moved}/{} lb={lb:.4}", args.flips);

    if args.enforce && (lb < args.target_lb || min_div < args.target_lb) {
        eprintln!(
            "FAIL: lb={lb:.4} min_divergence={min_div:.4} below target {:.2}",
            args.target_lb
        );
        std::process::exit(2);
    }
}
