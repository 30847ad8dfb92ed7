/// End-to-end tests: build scripts and drive them with fake collaborators
use choice_tree::catalog::{InMemoryCatalog, Item, ItemCatalog, ItemHandle, Player, PlayerState};
use choice_tree::{
    build_choice_tree, build_script, parse, Action, BuildOptions, ChoiceRuntime, Effect,
    ScriptLine, Transition,
};

/// Player store that records every call it receives
#[derive(Debug, Default)]
struct RecordingPlayer {
    calls: Vec<String>,
    credits: i64,
}

impl PlayerState for RecordingPlayer {
    fn add_credits(&mut self, amount: i64) {
        self.credits += amount;
        self.calls.push(format!("add_credits({})", amount));
    }

    fn add_item(&mut self, item: ItemHandle) {
        self.calls.push(format!("add_item({})", item.key));
    }

    fn remove_item(&mut self, item: &ItemHandle) -> bool {
        self.calls.push(format!("remove_item({})", item.key));
        true
    }
}

fn catalog() -> InMemoryCatalog {
    InMemoryCatalog::new()
        .with_item(Item::new("Fuel", "Plutonium fuel for spacecrafts."))
        .with_item(Item::new("Roxol Quartz", "An uncommon crystal."))
}

fn lines(texts: &[&str]) -> Vec<ScriptLine> {
    ScriptLine::sequence(texts.iter().copied())
}

#[test]
fn test_take_credits() {
    let tree = build_choice_tree(&lines(&["Hello.", "> Take credits", "credits 10"])).unwrap();
    assert_eq!(tree.synopsis, ["Hello."]);
    assert_eq!(tree.options.len(), 1);
    assert_eq!(tree.options[0].synopsis, "> Take credits");
    assert_eq!(tree.options[0].actions, [Action::GrantCredits(10)]);

    let mut player = RecordingPlayer::default();
    ChoiceRuntime::new(&tree)
        .select(0, &catalog(), &mut player)
        .unwrap();
    assert_eq!(player.credits, 10);
}

#[test]
fn test_get_and_remove_call_the_store() {
    let tree = build_choice_tree(&lines(&[
        "Pick one:",
        "> A",
        "get fuel",
        "> B",
        "remove fuel",
    ]))
    .unwrap();
    assert_eq!(tree.options.len(), 2);

    let catalog = catalog();
    let mut runtime = ChoiceRuntime::new(&tree);

    let mut player = RecordingPlayer::default();
    runtime.select(0, &catalog, &mut player).unwrap();
    assert_eq!(player.calls, ["add_item(fuel)"]);

    let mut player = RecordingPlayer::default();
    runtime.select(1, &catalog, &mut player).unwrap();
    assert_eq!(player.calls, ["remove_item(fuel)"]);
}

#[test]
fn test_malformed_credits_still_builds() {
    let built = build_script("Deal?\n> Sure\ncredits abc\n", BuildOptions::new()).unwrap();
    assert!(built.root.options[0].actions.is_empty());
    assert_eq!(built.warnings.len(), 1);
    assert_eq!(built.warnings[0].line(), 2);
}

#[test]
fn test_nested_choice_becomes_current() {
    let tree = build_choice_tree(&lines(&[
        "Go:", "> Door", "choice", "{", "Inside.", "> Leave", "}",
    ]))
    .unwrap();

    let [Action::EnterSubChoice(node)] = tree.options[0].actions.as_slice() else {
        panic!("expected one sub-choice action");
    };
    assert_eq!(node.synopsis, ["Inside."]);
    assert_eq!(node.options[0].synopsis, "> Leave");

    let mut runtime = ChoiceRuntime::new(&tree);
    let selection = runtime
        .select(0, &catalog(), &mut Player::default())
        .unwrap();
    assert_eq!(selection.transition, Transition::Entered(node));
    assert_eq!(runtime.current(), node.as_ref());
}

#[test]
fn test_single_option_without_actions_is_a_no_op() {
    let tree = parse("The hold is quiet.\n> Continue\n").unwrap();
    let mut player = Player::new(42);
    let before = player.clone();

    let selection = ChoiceRuntime::new(&tree)
        .select(0, &catalog(), &mut player)
        .unwrap();
    assert!(selection.effects.is_empty());
    assert!(selection.transition.is_exhausted());
    assert_eq!(player, before);
}

#[test]
fn test_walk_two_levels_deep() {
    let script = "\
Docking bay.
> Visit the market
choice
{
A merchant waves.
> Buy quartz
credits -30
get roxolquartz
choice
{
The merchant grins.
> Haggle
credits 5
}
> Leave
}
> Stay aboard
";
    let tree = parse(script).unwrap();
    assert_eq!(tree.depth(), 2);

    let catalog = catalog();
    let mut player = Player::new(100);
    let mut runtime = ChoiceRuntime::new(&tree);

    runtime.select(0, &catalog, &mut player).unwrap();
    assert_eq!(runtime.current().synopsis, ["A merchant waves."]);
    assert_eq!(runtime.current().options.len(), 2);

    runtime.select(0, &catalog, &mut player).unwrap();
    assert_eq!(runtime.current().synopsis, ["The merchant grins."]);
    assert_eq!(player.credits, 70);
    assert_eq!(player.count_key("Roxol Quartz"), 1);

    let selection = runtime.select(0, &catalog, &mut player).unwrap();
    assert!(selection.transition.is_exhausted());
    assert_eq!(player.credits, 75);
}

#[test]
fn test_synopsis_round_trips_byte_for_byte() {
    let texts = [
        "  \tOdd   spacing ",
        "Ünïcode, wide text",
        ">Tight option",
        ">   Loose option   ",
    ];
    let tree = build_choice_tree(&lines(&texts)).unwrap();
    assert_eq!(tree.synopsis, texts[..2]);
    assert_eq!(tree.options[0].synopsis, texts[2]);
    assert_eq!(tree.options[1].synopsis, texts[3]);
}

#[test]
fn test_selection_is_deterministic_and_replayable() {
    let script = "Trade post.\n> Sell\nremove fuel\ncredits 25\nget roxolquartz\n";
    let catalog = catalog();
    let fuel = catalog.resolve("fuel").unwrap();

    let mut saved = Player::new(10);
    saved.add_item(fuel.clone());
    saved.add_item(fuel);
    let saved_json = serde_json::to_string(&saved).unwrap();

    let mut outcomes = Vec::new();
    for _ in 0..2 {
        let tree = parse(script).unwrap();
        let mut player: Player = serde_json::from_str(&saved_json).unwrap();
        let selection = ChoiceRuntime::new(&tree)
            .select(0, &catalog, &mut player)
            .unwrap();
        outcomes.push((selection.effects, player));
    }

    assert_eq!(outcomes[0], outcomes[1]);
    let (effects, player) = &outcomes[0];
    assert_eq!(player.credits, 35);
    assert_eq!(player.count_key("fuel"), 1);
    assert_eq!(player.count_key("roxolquartz"), 1);
    assert!(matches!(effects[0], Effect::ItemRemoved { removed: true, .. }));
}

#[test]
fn test_tree_serializes_for_tooling() {
    let tree = parse("Go:\n> Door\nget fuel\nchoice\n{\nInside.\n> Leave\n}\n").unwrap();
    let json = serde_json::to_value(&tree).unwrap();
    assert_eq!(json["synopsis"][0], "Go:");
    assert_eq!(json["options"][0]["actions"][0]["GrantItem"], "fuel");
    assert_eq!(
        json["options"][0]["actions"][1]["EnterSubChoice"]["synopsis"][0],
        "Inside."
    );
}

#[test]
fn test_effects_serialize_with_tags() {
    let tree = parse("Hello.\n> Take credits\ncredits 10\n").unwrap();
    let selection = ChoiceRuntime::new(&tree)
        .select(0, &catalog(), &mut Player::default())
        .unwrap();
    let json = serde_json::to_value(&selection.effects).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{ "effect": "credits_granted", "amount": 10 }])
    );
}
