use anyhow::Result;

fn main() -> Result<()> {
    fortress_lib::main()
}
