//! The tool catalogue.
//!
//! A `ToolRegistry` maps tool names to their schemas. The catalogue is fixed:
//! it is built once at startup by `ToolRegistry::with_builtin_tools()` and
//! never mutated afterwards. Names are case-sensitive and unique — a
//! duplicate in the catalogue is an authoring defect, not a runtime error.
//!
//! The `priority` values form the executor's absolute per-tick ordering and
//! must not be renumbered: external consumers depend on them.

use std::collections::HashMap;

use crate::schema::{ArgNode, ToolSchema};

/// Read-only registry of tool schemas.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, ToolSchema>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { tools: HashMap::new() }
    }

    /// Create a registry loaded with the builtin tool catalogue.
    pub fn with_builtin_tools() -> Self {
        let mut registry = Self::new();
        for schema in builtin_tools() {
            registry.register(schema);
        }
        registry
    }

    /// Register a schema. Duplicate names are a catalogue-authoring defect.
    pub fn register(&mut self, schema: ToolSchema) {
        let name = schema.name.clone();
        let previous = self.tools.insert(name.clone(), schema);
        debug_assert!(previous.is_none(), "duplicate tool in catalogue: {name}");
    }

    /// Look up a schema by its case-sensitive name.
    pub fn get(&self, name: &str) -> Option<&ToolSchema> {
        self.tools.get(name)
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// All schemas, ordered by execution priority ascending.
    pub fn schemas_by_priority(&self) -> Vec<&ToolSchema> {
        let mut schemas: Vec<&ToolSchema> = self.tools.values().collect();
        schemas.sort_by_key(|s| s.priority);
        schemas
    }
}

/// The builtin catalogue, in execution-priority order.
fn builtin_tools() -> Vec<ToolSchema> {
    vec![
        ToolSchema::new(
            "check",
            0,
            "**Syntax:** ```check [pos x y z] [ang pitch yaw] [posepsilon val] [angepsilon val]```\n\n\
             The check tool accepts a target position and angle, and a precision value \
             (posepsilon (default: 0.5), angepsilon (default: 0.2)). **Before** the tick it is on, \
             it will check whether the player position is close to (meaning \"within posepsilon / \
             angepsilon units\") the target position, and if not, replay the active script. It will \
             do this a bounded number of times (default 15).\n\n\
             **Example:** ```check pos 100 250 312.7```",
        )
        .arg(ArgNode::keyword("pos").optional().children([
            ArgNode::number(),
            ArgNode::number(),
            ArgNode::number(),
        ]))
        .arg(ArgNode::keyword("ang").optional().children([
            ArgNode::number(),
            ArgNode::number(),
        ]))
        .arg(ArgNode::keyword("posepsilon").optional().children([ArgNode::number()]))
        .arg(ArgNode::keyword("angepsilon").optional().children([ArgNode::number()])),
        ToolSchema::new(
            "cmd",
            1,
            "**Syntax:** ```cmd <command>```\n\n\
             Runs the provided console command. Not encased in quotes.\n\n\
             **Example:** ```cmd say hello world!```",
        )
        .unordered()
        .allow_arbitrary_arguments(),
        ToolSchema::new(
            "stop",
            2,
            "**Syntax:** ```stop```\n\n\
             Stops every tool activated prior to given tick.\n\n\
             **Example:** ```stop```",
        )
        .unordered()
        .arguments_optional(),
        ToolSchema::new(
            "use",
            3,
            "**Syntax:** ```use [spam]```\n\n\
             Presses the ```+use``` input. It also has an option for spamming, which will spam \
             +use every other tick.\n\n\
             **Example:** ```use spam```",
        )
        .arguments_optional()
        .arg(ArgNode::keyword("spam").optional().describe("Spams ```+use``` every other tick")),
        ToolSchema::new(
            "duck",
            4,
            "**Syntax:** ```duck [duration]```\n\n\
             Presses the duck input. Can take a number parameter for a duration.\n\n\
             **Example:** ```duck 20```",
        )
        .with_off()
        .registers_active_state()
        .duration_index(0)
        .arguments_optional()
        .arg(
            ArgNode::keyword("on")
                .optional()
                .describe("Enables ```duck```.")
                .otherwise([ArgNode::number().optional()]),
        ),
        ToolSchema::new(
            "zoom",
            5,
            "**Syntax:** ```zoom [action]```\n\n\
             Used for zooming in and out. Also detects whether to press an input based on whether \
             you're zooming or not.\n\n\
             **Example:** ```zoom in```",
        )
        .arg(ArgNode::keyword("in").optional().describe("Zooms in"))
        .arg(ArgNode::keyword("out").optional().describe("Zooms out"))
        .arg(ArgNode::keyword("toggle").optional().describe("Toggles zoom")),
        ToolSchema::new(
            "shoot",
            6,
            "**Syntax:** ```shoot [portal]```\n\n\
             Used to shoot portals. Can automate spamming with the ```spam``` property, which will \
             automatically detect the portal gun's cooldown.\n\n\
             **Example:** ```shoot blue```",
        )
        .unordered()
        .with_off()
        .arg(ArgNode::keyword("blue").optional().describe("Shoots the blue portal"))
        .arg(ArgNode::keyword("orange").optional().describe("Shoots the orange portal"))
        .arg(ArgNode::keyword("spam").optional().describe(
            "Automates spamming, automatically detecting the portal gun's cooldown",
        )),
        ToolSchema::new(
            "setang",
            7,
            "**Syntax:** ```setang <pitch> <yaw> [time] [easing]```\n\n\
             This tool works basically the same as setang console command. It will adjust the view \
             analog in a way so the camera is looking towards given angles.\n\n\
             **Example:** ```setang 0 0 20```",
        )
        .registers_active_state()
        .duration_index(2)
        .arg(ArgNode::number())
        .arg(ArgNode::number())
        .arg(ArgNode::number().optional())
        .arg(ArgNode::word().optional().describe(
            "Easing type for the setang among: `cubic`, `exp`/`exponential`, `linear` or `sin`/`sine`",
        )),
        ToolSchema::new(
            "autoaim",
            8,
            "**Syntax:** ```autoaim [ent] <x> <y> <z> [time] [easing]```\n\n\
             The Auto Aim tool will automatically aim towards a specified point in 3D space.\n\n\
             **Example:** ```autoaim 0 0 0 20```",
        )
        .with_off()
        .registers_active_state()
        .duration_index(1)
        .arg(
            ArgNode::keyword("ent")
                .optional()
                .children([ArgNode::word().optional().otherwise([ArgNode::number()])])
                .otherwise([ArgNode::number(), ArgNode::number(), ArgNode::number()]),
        )
        .arg(ArgNode::number().optional())
        .arg(ArgNode::word().optional().describe(
            "Specifies which algorithm to use for interpolation. Options are `cubic`, \
             `exp`/`exponential`, `linear` or `sin`/`sine`. If omitted, `linear` is used.",
        )),
        ToolSchema::new(
            "look",
            9,
            "**Syntax:** ```look <pitch> <yaw> [time]```\n\n\
             Can be used to control the view analog. It also accepts additional parameters, like \
             word-based directions or time.\n\n\
             **Example:** ```look 10deg 173deg 10```",
        )
        .with_off()
        .registers_active_state()
        .duration_index(1)
        .arg(ArgNode::keyword("stop").optional().otherwise([
            ArgNode::number_with_unit("deg")
                .optional()
                .children([ArgNode::number_with_unit("deg")])
                .otherwise([ArgNode::word(), ArgNode::word().optional()]),
        ]))
        .arg(ArgNode::number().optional().describe("Look duration, in ticks")),
        ToolSchema::new(
            "autojump",
            10,
            "**Syntax:** ```autojump [on|duck|ducked]```\n\n\
             Anything other than ```on```, ```duck``` or ```ducked``` will disable the tool.\n\n\
             Autojump tool will change the jump button state depending on whether the player is \
             grounded or not, resulting in automatically jumping on the earliest contact with a \
             ground.\n\n\
             **Example:** ```autojump on```",
        )
        .with_off()
        .registers_active_state()
        .arg(ArgNode::keyword("on").optional().describe("Enables ```autojump```."))
        .arg(ArgNode::keyword("duck").optional().describe(
            "Enables ```autojump``` while also ducking. Ducking slightly increases your jump height.",
        ))
        .arg(ArgNode::keyword("ducked").optional().describe(
            "Enables ```autojump``` while also ducking. Ducking slightly increases your jump height.",
        )),
        ToolSchema::new(
            "absmov",
            11,
            "**Syntax:** ```absmov <angle> [strength]```\n\n\
             Absolute movement tool will generate movement values depending on the absolute move \
             direction you provide in degrees. Giving off as an argument will disable the tool. \
             The strength parameter must be between 0 and 1 (default) and controls how fast the \
             player will move.\n\n\
             **Example:** ```absmov 90 0.5```",
        )
        .with_off()
        .registers_active_state()
        .arg(ArgNode::number_with_unit("deg?").optional())
        .arg(ArgNode::number().optional()),
        ToolSchema::new(
            "move",
            12,
            "**Syntax:** ```move <direction> [scale]```\n\n\
             Controls the movement analog. Can accept 1-2 direction parameters, as well as \
             word-based parameters.\n\n\
             **Example:** ```move forward left```",
        )
        .with_off()
        .registers_active_state()
        .arg(ArgNode::keyword("stop").optional().otherwise([
            ArgNode::number_with_unit("deg")
                .optional()
                .otherwise([ArgNode::word(), ArgNode::word().optional()]),
            ArgNode::number().optional().describe("Scale factor"),
        ])),
        ToolSchema::new(
            "strafe",
            13,
            "**Syntax:** ```strafe [parameters]```\n\n\
             The strafe tool will adjust player input to get a different kind of strafing \
             depending on parameters.\n\n\
             **Example:** ```strafe 299.999ups left veccam```",
        )
        .unordered()
        .with_off()
        .registers_active_state()
        .arg(ArgNode::keyword("vec").optional().describe(
            "Enables vectorial strafing (movement analog is adjusted to get desired movement \
             direction). (default)",
        ))
        .arg(ArgNode::keyword("ang").optional().describe(
            "Enables angular strafing (view analog is adjusted to get desired movement direction). \
             This isn't particularly recommended as it doesn't look appealing, however it is the \
             only effective strafing type while on velocity gel.",
        ))
        .arg(ArgNode::keyword("veccam").optional().describe(
            "Enables special vectorial strafing that rotates you towards your current moving \
             direction.",
        ))
        .arg(ArgNode::keyword("max").optional().describe(
            "Makes autostrafer aim for the greatest acceleration. (default)",
        ))
        .arg(ArgNode::keyword("keep").optional().describe(
            "Makes autostrafer maintain the current velocity.",
        ))
        .arg(ArgNode::keyword("forward").optional().describe(
            "Autostrafer will try to strafe in a straight line, towards the current view angle. \
             (default)",
        ))
        .arg(ArgNode::keyword("forwardvel").optional().describe(
            "Autostrafer will try to strafe in a straight line, towards the current velocity angle.",
        ))
        .arg(ArgNode::keyword("left").optional().describe(
            "Autostrafer will try to strafe left.",
        ))
        .arg(ArgNode::keyword("right").optional().describe(
            "Autostrafer will try to strafe right.",
        ))
        .arg(ArgNode::keyword("nopitchlock").optional().describe(
            "Make the autostrafer not clamp the pitch. The autostrafer will always clamp your \
             pitch angle (up and down) between -30 and 30 when midair, as it gives the fastest \
             possible acceleration (forward movement is being scaled by a cosine of that angle \
             while being airborne). This argument will tell the autostrafer that you wish to \
             enable sub-optimal strafing (this is useful when you need to hit a shot while \
             strafing for example).",
        ))
        .arg(ArgNode::keyword("letspeedlock").optional().describe(
            "Let the autostrafer speedlock. This option only exists from version 4 onwards and \
             mimics old behavior.",
        ))
        .arg(ArgNode::number_with_unit("ups").optional())
        .arg(ArgNode::number_with_unit("deg").optional()),
        ToolSchema::new(
            "decel",
            14,
            "**Syntax:** ```decel <speed>```\n\n\
             The decelaration tool will slow down as quickly as possible to the given speed.\n\n\
             **Example:** ```decel 100```",
        )
        .with_off()
        .registers_active_state()
        .arg(ArgNode::number_with_unit("ups?").optional()),
    ]
}
