use cim_workflow::DefinitionLoader;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let file = args
        .next()
        .ok_or("usage: validate_workflow <file> [addons_dir...]")?;
    let search: Vec<PathBuf> = args.map(PathBuf::from).collect();

    let definition = DefinitionLoader::new(search).load(&file)?;

    println!(
        "{file}: {} states, {} transitions",
        definition.state_count(),
        definition.transition_count()
    );
    for state in &definition.states {
        let marker = if state.is_visible() { " " } else { "~" };
        println!("{marker} {} ({})", state.name, state.label);
        for t in &state.transitions {
            let target = t.new_state.as_ref().map(|s| s.as_str()).unwrap_or("-");
            let screen = if t.requires_confirmation() { " [screen]" } else { "" };
            println!("    {} -> {}{}", t.name, target, screen);
        }
    }
    Ok(())
}
