use ubc_survival_game::data::{CatalogError, EventCatalog, Stat};
use ubc_survival_game::{RunState, builtin_events, builtin_profiles};

#[test]
fn builtin_catalog_parses_and_validates() {
    let catalog = builtin_events();
    assert_eq!(catalog.len(), 31);
    assert_eq!(catalog.validate(), Ok(()));
}

#[test]
fn builtin_catalog_contains_the_narrative_arcs() {
    let catalog = builtin_events();
    for id in [
        "rain-bus",
        "party-invite",
        "party-consequence",
        "raccoon-encounter",
        "raccoon-gift",
        "raccoon-revenge",
        "academic-probation",
        "chaos-reign",
        "care-package",
        "found-money",
    ] {
        assert!(catalog.get_by_id(id).is_some(), "missing event `{id}`");
    }

    let gift = catalog.get_by_id("raccoon-gift").unwrap();
    let cond = gift.conditions.as_ref().unwrap();
    assert_eq!(cond.flag.as_deref(), Some("raccoon_friend"));
    assert!(
        gift.options
            .iter()
            .any(|o| o.remove_flags.contains(&"raccoon_friend".to_string()))
    );

    let probation = catalog.get_by_id("academic-probation").unwrap();
    let gate = probation.conditions.as_ref().unwrap().max_stat.unwrap();
    assert_eq!(gate.stat, Stat::Survival);
    assert_eq!(gate.value, 20);
    assert_eq!(probation.weight, 10);

    let crisis = catalog.get_by_id("chaos-reign").unwrap();
    let gate = crisis.conditions.as_ref().unwrap().min_stat.unwrap();
    assert_eq!(gate.stat, Stat::Chaos);
    assert_eq!(gate.value, 80);
}

#[test]
fn undeclared_weights_default_to_one() {
    let catalog = builtin_events();
    assert_eq!(catalog.get_by_id("rain-bus").unwrap().weight, 1);
    assert_eq!(catalog.get_by_id("found-money").unwrap().weight, 5);
    assert_eq!(catalog.get_by_id("care-package").unwrap().weight, 15);
}

#[test]
fn builtin_profiles_match_the_selection_tables() {
    let profiles = builtin_profiles();
    assert_eq!(profiles.faculties.len(), 7);
    assert_eq!(profiles.years.len(), 6);
    assert_eq!(profiles.vibes.len(), 6);

    let eng = profiles.faculty("Engineering").unwrap();
    assert_eq!(
        (eng.mods.survival, eng.mods.serotonin, eng.mods.chaos),
        (10, -10, 5)
    );
    let grad = profiles.year("Grad Student").unwrap();
    assert_eq!(
        (grad.mods.survival, grad.mods.serotonin, grad.mods.chaos),
        (10, -10, -5)
    );
    let burnout = profiles.vibe("Burnout").unwrap();
    assert_eq!(
        (
            burnout.mods.survival,
            burnout.mods.serotonin,
            burnout.mods.chaos
        ),
        (-10, -10, 5)
    );
}

#[test]
fn no_builtin_option_adds_and_removes_one_flag() {
    // The validator rejects the ambiguous add+remove shape; the embedded
    // catalog must therefore never contain it.
    let catalog = builtin_events();
    for event in &catalog.events {
        for option in &event.options {
            for flag in &option.add_flags {
                assert!(
                    !option.remove_flags.contains(flag),
                    "event `{}` option `{}` conflicts on `{flag}`",
                    event.id,
                    option.text
                );
            }
        }
    }
}

#[test]
fn flag_conflict_is_rejected_at_validation_time() {
    let json = r#"{
        "events": [
            {
                "id": "bad",
                "title": "Bad",
                "description": "",
                "options": [
                    {
                        "text": "conflicted",
                        "add_flags": ["x"],
                        "remove_flags": ["x"],
                        "response": "?"
                    },
                    { "text": "fine", "response": "ok" }
                ]
            }
        ]
    }"#;
    let catalog = EventCatalog::from_json(json).unwrap();
    assert!(matches!(
        catalog.validate(),
        Err(CatalogError::FlagConflict { flag, .. }) if flag == "x"
    ));
}

#[test]
fn run_state_serialization_round_trips() {
    let mut run = RunState::default();
    run.add_flag("popular");
    run.add_flag("broke");
    run.order = vec![2, 0, 1];
    run.cursor = 1;

    let saved = serde_json::to_string(&run).unwrap();
    let restored: RunState = serde_json::from_str(&saved).unwrap();
    assert_eq!(restored, run);
}
