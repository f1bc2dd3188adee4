use super::CommandDef;

pub(super) fn global_command_defs() -> Vec<CommandDef> {
    vec![
        CommandDef {
            name: "help",
            aliases: &["h", "?"],
            usage: "help [command]",
            help: "Show help",
        },
        CommandDef {
            name: "settings",
            aliases: &["config"],
            usage: "settings",
            help: "Open connection settings",
        },
        CommandDef {
            name: "import",
            aliases: &[],
            usage: "import [json]",
            help: "Quick-import a pasted config object",
        },
        CommandDef {
            name: "clear",
            aliases: &["cls"],
            usage: "clear",
            help: "Clear the activity log",
        },
        CommandDef {
            name: "log",
            aliases: &["logs"],
            usage: "log",
            help: "Show the full activity log",
        },
        CommandDef {
            name: "quit",
            aliases: &["exit"],
            usage: "quit",
            help: "Exit",
        },
    ]
}

pub(super) fn control_command_defs() -> Vec<CommandDef> {
    let mut out = global_command_defs();
    out.extend(vec![
        CommandDef {
            name: "send",
            aliases: &["s"],
            usage: "send [payload]",
            help: "Write the draft (or the given payload) to the database",
        },
        CommandDef {
            name: "say",
            aliases: &["msg"],
            usage: "say <text>",
            help: "Send a text message for the device display",
        },
        CommandDef {
            name: "ai",
            aliases: &["gen"],
            usage: "ai <prompt>",
            help: "Draft a command from a natural-language request",
        },
        CommandDef {
            name: "preset",
            aliases: &["p"],
            usage: "preset <led-on|led-off|reboot>",
            help: "Load a preset into the draft",
        },
        CommandDef {
            name: "edit",
            aliases: &["e"],
            usage: "edit",
            help: "Edit the draft payload",
        },
    ]);
    out
}

pub(super) fn settings_command_defs() -> Vec<CommandDef> {
    let mut out = global_command_defs();
    out.retain(|d| d.name != "settings");
    out.extend(vec![
        CommandDef {
            name: "set",
            aliases: &[],
            usage: "set <field> <value>",
            help: "Set a connection field (e.g. set databaseURL https://...)",
        },
        CommandDef {
            name: "save",
            aliases: &["w"],
            usage: "save",
            help: "Save the configuration and reconnect",
        },
        CommandDef {
            name: "back",
            aliases: &[],
            usage: "back",
            help: "Leave settings without saving",
        },
    ]);
    out
}
