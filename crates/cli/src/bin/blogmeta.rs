use anyhow::Result;

fn main() -> Result<()> {
    blogmeta_cli::main_entry()
}
