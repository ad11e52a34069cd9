use crate::cmd::load_registry;
use crate::config::KeysArgs;
use crate::error::ServerError;

pub fn run(args: KeysArgs) -> Result<(), ServerError> {
    let registry = load_registry(&args.config.config)?;
    let keyword = registry.get(&args.keyword)?;
    for (index, (key, value_type)) in keyword.schema().iter().enumerate() {
        println!("{index} {key} {value_type}");
    }
    Ok(())
}
