//! Built-in `data` command.
//!
//! Only `data get` is supported, and it always answers with the same canned
//! entity and block data.

use serde_json::{Value, json};

use crate::command::{Arity, CommandDefinition};
use crate::context::CommandContext;
use crate::error::{CommandError, CommandResult};

/// SNBT printed for `data get entity <player>`.
pub const FAKE_PLAYER_RAW: &str = r#"{seenCredits: 0b, DeathTime: 0s, foodTickTimer: 0, recipeBook: {isBlastingFurnaceFilteringCraftable: 0b, isGuiOpen: 0b, toBeDisplayed: [], isFurnaceFilteringCraftable: 0b, isBlastingFurnaceGuiOpen: 0b, isFurnaceGuiOpen: 0b, isSmokerGuiOpen: 0b, isFilteringCraftable: 0b, isSmokerFilteringCraftable: 0b, recipes: []}, OnGround: 1b, AbsorptionAmount: 0.0f, XpTotal: 0, playerGameType: 1, Attributes: [{Name: "minecraft:generic.movement_speed", Base: 0.10000000149011612d}], Invulnerable: 0b, SelectedItemSlot: 0, Brain: {memories: {}}, Dimension: "minecraft:overworld", abilities: {walkSpeed: 0.1f, flySpeed: 0.05f, instabuild: 1b, flying: 0b, mayfly: 1b, invulnerable: 1b, mayBuild: 1b}, Score: 0, Rotation: [0.0f, 0.0f], HurtByTimestamp: 0, foodSaturationLevel: 5.0f, Air: 300s, EnderItems: [], XpSeed: 1266479716, foodLevel: 20, UUID: [I; 240899192, 1909081247, -1531449260, -1479246119], XpLevel: 0, Inventory: [], Motion: [0.0d, -0.0784000015258789d, 0.0d], FallDistance: 0.0f, DataVersion: 2586, SleepTimer: 0s, XpP: 0.0f, previousPlayerGameType: -1, Health: 20.0f, HurtTime: 0s, Pos: [174.0d, 1.0d, -184.0d], FallFlying: 0b, Fire: -20s, PortalCooldown: 0, foodExhaustionLevel: 0.0f}"#;

/// SNBT printed for `data get block`, with `%XVALUE%` style placeholders.
pub const FAKE_BLOCK_RAW: &str = r#"{z: %ZVALUE%, powered: 0b, x: %XVALUE%, auto: 0b, UpdateLastExecution: 1b, id: "minecraft:command_block", y: %YVALUE%, conditionMet: 0b, Command: "", SuccessCount: 0, CustomName: '{"text":"@"}', TrackOutput: 1b}"#;

const EMPTY_STORAGE: &str = "{}";

fn player_data() -> Value {
    json!({
        "seenCredits": 0,
        "DeathTime": 0,
        "foodTickTimer": 0,
        "recipeBook": {
            "isBlastingFurnaceFilteringCraftable": 0,
            "isGuiOpen": 0,
            "toBeDisplayed": [],
            "isFurnaceFilteringCraftable": 0,
            "isBlastingFurnaceGuiOpen": 0,
            "isFurnaceGuiOpen": 0,
            "isSmokerGuiOpen": 0,
            "isFilteringCraftable": 0,
            "isSmokerFilteringCraftable": 0,
            "recipes": []
        },
        "OnGround": 1,
        "AbsorptionAmount": 0,
        "XpTotal": 0,
        "playerGameType": 1,
        "Attributes": [
            {"Name": "minecraft:generic.movement_speed", "Base": 0.10000000149011612}
        ],
        "Invulnerable": 0,
        "SelectedItemSlot": 0,
        "Brain": {"memories": {}},
        "Dimension": "minecraft:overworld",
        "abilities": {
            "walkSpeed": 0.1,
            "flySpeed": 0.05,
            "instabuild": 1,
            "flying": 0,
            "mayfly": 1,
            "invulnerable": 1,
            "mayBuild": 1
        },
        "Score": 0,
        "Rotation": [0, 0],
        "HurtByTimestamp": 0,
        "foodSaturationLevel": 5,
        "Air": 300,
        "EnderItems": [],
        "XpSeed": 1266479716,
        "foodLevel": 20,
        "UUID": [240899192, 1909081247, -1531449260, -1479246119],
        "XpLevel": 0,
        "Inventory": [],
        "Motion": [0, -0.0784000015258789, 0],
        "FallDistance": 0,
        "DataVersion": 2586,
        "SleepTimer": 0,
        "XpP": 0,
        "previousPlayerGameType": -1,
        "Health": 20,
        "HurtTime": 0,
        "Pos": [174, 1, -184],
        "FallFlying": 0,
        "Fire": -20,
        "PortalCooldown": 0,
        "foodExhaustionLevel": 0
    })
}

fn block_data(x: i64, y: i64, z: i64) -> Value {
    json!({
        "z": z,
        "powered": 0,
        "x": x,
        "auto": 0,
        "UpdateLastExecution": 1,
        "id": "minecraft:command_block",
        "y": y,
        "conditionMet": 0,
        "Command": "",
        "SuccessCount": 0,
        "CustomName": "{\"text\":\"@\"}",
        "TrackOutput": 1
    })
}

pub fn definition() -> CommandDefinition {
    CommandDefinition::builder(["data"])
        .help("Show a fake data")
        .subcommand("get", Arity::at_least(1), get)
        .build()
}

fn get(ctx: &CommandContext<'_>, args: &[String]) -> CommandResult {
    let (target, rest) = args
        .split_first()
        .ok_or_else(|| CommandError::usage("missing target"))?;
    match target.as_str() {
        "entity" => get_entity(ctx, rest),
        "block" => get_block(ctx, rest),
        _ => get_storage(ctx, rest),
    }
}

fn get_entity(ctx: &CommandContext<'_>, args: &[String]) -> CommandResult {
    let [player, path @ ..] = args else {
        return Err(CommandError::usage("expected <player> [path]"));
    };
    if path.len() > 1 {
        return Err(CommandError::usage("expected <player> [path]"));
    }
    if !ctx.roster().is_online(player) {
        ctx.console().info("No entity was found");
        return Ok(());
    }

    let title = format!("{player} has the following entity data: ");
    match path.first() {
        None => ctx.console().info(format!("{title}{FAKE_PLAYER_RAW}")),
        Some(path) => show_path(ctx, &title, &player_data(), path),
    }
    Ok(())
}

fn get_block(ctx: &CommandContext<'_>, args: &[String]) -> CommandResult {
    if !(3..=4).contains(&args.len()) {
        return Err(CommandError::usage("expected <x> <y> <z> [path]"));
    }
    let [x, y, z] = [&args[0], &args[1], &args[2]].map(|value| value.parse::<i64>());
    let (Ok(x), Ok(y), Ok(z)) = (x, y, z) else {
        return Err(CommandError::usage("coordinates must be integers"));
    };

    let title = format!("{x}, {y}, {z} has the following block data: ");
    match args.get(3) {
        None => {
            let raw = FAKE_BLOCK_RAW
                .replace("%XVALUE%", &x.to_string())
                .replace("%YVALUE%", &y.to_string())
                .replace("%ZVALUE%", &z.to_string());
            ctx.console().info(format!("{title}{raw}"));
        }
        Some(path) => show_path(ctx, &title, &block_data(x, y, z), path),
    }
    Ok(())
}

fn get_storage(ctx: &CommandContext<'_>, args: &[String]) -> CommandResult {
    let [id, path @ ..] = args else {
        return Err(CommandError::usage("expected <id> [path]"));
    };
    if path.len() > 1 {
        return Err(CommandError::usage("expected <id> [path]"));
    }

    let id = id.trim();
    let id = if id.contains(':') {
        id.to_string()
    } else {
        format!("minecraft:{id}")
    };
    match path.first() {
        None => ctx.console().info(format!(
            "Storage {id} has the following contents: {EMPTY_STORAGE}"
        )),
        Some(path) => ctx
            .console()
            .info(format!("Found no elements matching {path}")),
    }
    Ok(())
}

fn show_path(ctx: &CommandContext<'_>, title: &str, data: &Value, path: &str) {
    match lookup(data, path) {
        Some(found) => ctx.console().info(format!("{title}{found}")),
        None => ctx
            .console()
            .info(format!("Found no elements matching {path}")),
    }
}

/// Follow a dotted path through nested objects.
///
/// Scalars come back bare, compounds as compact JSON.
fn lookup(data: &Value, path: &str) -> Option<String> {
    let mut current = data;
    for key in path.split('.') {
        current = current.as_object()?.get(key)?;
    }
    Some(match current {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::test_support::dispatcher;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lookup() {
        let data = player_data();
        assert_eq!(lookup(&data, "Health").as_deref(), Some("20"));
        assert_eq!(lookup(&data, "abilities.walkSpeed").as_deref(), Some("0.1"));
        assert_eq!(
            lookup(&data, "Dimension").as_deref(),
            Some("minecraft:overworld")
        );
        assert_eq!(lookup(&data, "Pos").as_deref(), Some("[174,1,-184]"));
        assert_eq!(lookup(&data, "Brain.memories").as_deref(), Some("{}"));
        assert_eq!(lookup(&data, "Pos.x"), None);
        assert_eq!(lookup(&data, "missing"), None);
        assert_eq!(lookup(&data, ""), None);
    }

    #[test]
    fn test_entity_offline() {
        let (dispatcher, sink) = dispatcher(20);
        dispatcher.dispatch("data get entity Steve").unwrap();

        assert_eq!(sink.lines(), ["No entity was found"]);
    }

    #[test]
    fn test_entity_raw_and_path() {
        let (dispatcher, sink) = dispatcher(20);
        dispatcher.dispatch("player join Steve").unwrap();
        sink.clear();

        dispatcher.dispatch("data get entity Steve").unwrap();
        dispatcher.dispatch("data get entity Steve foodLevel").unwrap();
        dispatcher.dispatch("data get entity Steve nope.nope").unwrap();

        assert_eq!(
            sink.lines(),
            [
                format!("Steve has the following entity data: {FAKE_PLAYER_RAW}"),
                "Steve has the following entity data: 20".to_string(),
                "Found no elements matching nope.nope".to_string(),
            ]
        );
    }

    #[test]
    fn test_entity_usage() {
        let (dispatcher, _) = dispatcher(20);
        assert!(dispatcher.dispatch("data get entity").is_err());
        assert!(dispatcher.dispatch("data get entity Steve a b").is_err());
    }

    #[test]
    fn test_block() {
        let (dispatcher, sink) = dispatcher(20);
        dispatcher.dispatch("data get block 1 64 -3").unwrap();
        dispatcher.dispatch("data get block 1 64 -3 id").unwrap();
        dispatcher.dispatch("data get block 1 64 -3 y").unwrap();

        let lines = sink.lines();
        assert!(lines[0].starts_with("1, 64, -3 has the following block data: {z: -3, powered: 0b, x: 1,"));
        assert!(lines[0].contains("y: 64,"));
        assert_eq!(
            lines[1],
            "1, 64, -3 has the following block data: minecraft:command_block"
        );
        assert_eq!(lines[2], "1, 64, -3 has the following block data: 64");
    }

    #[test]
    fn test_block_needs_integer_coordinates() {
        let (dispatcher, _) = dispatcher(20);
        let err = dispatcher.dispatch("data get block 1 ~ 3").unwrap_err();
        assert_eq!(
            err.as_parsing().map(|e| e.text()),
            Some("data get block 1 ~ 3")
        );
        assert!(dispatcher.dispatch("data get block 1 2").is_err());
    }

    #[test]
    fn test_storage() {
        let (dispatcher, sink) = dispatcher(20);
        dispatcher.dispatch("data get storage mydata").unwrap();
        dispatcher.dispatch("data get storage mod:thing").unwrap();

        assert_eq!(
            sink.lines(),
            [
                "Storage minecraft:mydata has the following contents: {}",
                "Storage mod:thing has the following contents: {}",
            ]
        );
    }

    #[test]
    fn test_data_without_get_is_parsing_error() {
        let (dispatcher, _) = dispatcher(20);
        let err = dispatcher.dispatch("data merge entity Steve").unwrap_err();
        assert_eq!(
            err.as_parsing().map(|e| e.text()),
            Some("data merge entity Steve")
        );
    }
}
