use data_loader::CandidateTable;
use std::path::Path;
use std::time::Instant;

fn main() {
    let path = Path::new("data/job_candidates.csv");

    println!("Loading candidate table...\n");

    let start = Instant::now();
    let table = CandidateTable::load_from_file(path)
        .expect("Failed to load candidates");
    let elapsed = start.elapsed();

    let with_salary = table
        .records()
        .iter()
        .filter(|record| record.salary_midpoint.is_some())
        .count();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Columns: {}", table.columns().len());
    println!("Candidates with experience: {}", table.len());
    println!("Candidates with salary midpoint: {}", with_salary);
    println!("\nPerformance: {:.0} records/second",
             table.len() as f64 / elapsed.as_secs_f64());
}
