use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    innovation_taxonomy::apps::run_taxonomy_cli(std::env::args().skip(1))
}
