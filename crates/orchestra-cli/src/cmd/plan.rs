use crate::output::print_json;
use anyhow::Context;
use orchestra_core::paths::Layout;
use orchestra_core::plan::{Budgets, Plan};

pub fn run(layout: &Layout, goal: &str, budgets: Budgets, json: bool) -> anyhow::Result<()> {
    let budgets = (budgets != Budgets::default()).then_some(budgets);
    let plan = Plan::new(goal, budgets);
    plan.save(layout).context("failed to write plan.json")?;

    if json {
        print_json(&plan)?;
    } else {
        println!("ok: plan.json written");
        println!("Goal: {}", plan.goal);
    }
    Ok(())
}
