use cim_workflow::{DefinitionLoader, ViewRewriter, WorkflowContext, WorkflowSettings};
use std::fs;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (definition, view) = match args.as_slice() {
        [definition, view, ..] => (definition, view),
        _ => return Err("usage: render_view <definition> <view> [state transition]".into()),
    };

    let context = match args.get(2..4) {
        Some([state, transition]) => WorkflowContext::for_transition(state.as_str(), transition.as_str()),
        _ => WorkflowContext::new(),
    };

    let settings = WorkflowSettings::load(None)?;
    let definition = DefinitionLoader::new(settings.addons_path.clone()).load(definition)?;
    let arch = fs::read_to_string(view)?;

    let rendered = ViewRewriter::new(&definition, &settings).rewrite(&arch, &context)?;
    println!("{rendered}");
    Ok(())
}
