use crate::util::Vec3D;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use strum_macros::{Display, EnumIter};

/// A request issued to the flight control core by a presentation or CLI layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Arm,
    Disarm,
    Takeoff,
    Land,
    Hover,
    Emergency,
    /// Plan and fly a path to the given position in the local world frame.
    Navigate(Vec3D<f64>),
    /// Plan and fly back to the home point.
    ReturnHome,
}

/// The payload-free discriminant of a [`Command`], used for events and statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum CommandKind {
    Arm,
    Disarm,
    Takeoff,
    Land,
    Hover,
    Emergency,
    Navigate,
    ReturnHome,
}

/// Reasons a command is refused. The core stays tickable after any of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum CommandError {
    #[strum(to_string = "drone is not armed")]
    NotArmed,
    #[strum(to_string = "drone is already airborne")]
    AlreadyAirborne,
    #[strum(to_string = "drone is already on the ground")]
    AlreadyLanded,
    #[strum(to_string = "no link to the flight controller")]
    NotConnected,
    #[strum(to_string = "transition not allowed in the current state")]
    InvalidTransition,
    #[strum(to_string = "a path is already being planned")]
    Busy,
}

impl std::error::Error for CommandError {}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Arm => CommandKind::Arm,
            Command::Disarm => CommandKind::Disarm,
            Command::Takeoff => CommandKind::Takeoff,
            Command::Land => CommandKind::Land,
            Command::Hover => CommandKind::Hover,
            Command::Emergency => CommandKind::Emergency,
            Command::Navigate(_) => CommandKind::Navigate,
            Command::ReturnHome => CommandKind::ReturnHome,
        }
    }
}

impl CommandKind {
    /// Short operator-facing description of an accepted command.
    pub fn describe(self) -> &'static str {
        match self {
            CommandKind::Arm => "Arming drone",
            CommandKind::Disarm => "Disarming drone",
            CommandKind::Takeoff => "Taking off",
            CommandKind::Land => "Landing",
            CommandKind::Hover => "Holding position",
            CommandKind::Emergency => "EMERGENCY STOP",
            CommandKind::Navigate => "Navigating to target",
            CommandKind::ReturnHome => "Returning to home point",
        }
    }
}

/// Failure to read a [`Command`] from its textual form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    Empty,
    UnknownCommand(String),
    WrongArity { command: &'static str, expected: usize, found: usize },
    InvalidNumber(String),
}

impl Display for CommandParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandParseError::Empty => write!(f, "empty command"),
            CommandParseError::UnknownCommand(verb) => write!(f, "unknown command '{verb}'"),
            CommandParseError::WrongArity { command, expected, found } => {
                write!(f, "'{command}' takes {expected} arguments, got {found}")
            }
            CommandParseError::InvalidNumber(raw) => write!(f, "'{raw}' is not a finite number"),
        }
    }
}

impl std::error::Error for CommandParseError {}

impl FromStr for Command {
    type Err = CommandParseError;

    /// Parses `arm`, `disarm`, `takeoff`, `land`, `hover`, `emergency`, `rth` and `goto X Y Z`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let verb = words.next().ok_or(CommandParseError::Empty)?.to_lowercase();
        let args: Vec<&str> = words.collect();
        let nullary = |cmd: Command, name: &'static str| {
            if args.is_empty() {
                Ok(cmd)
            } else {
                Err(CommandParseError::WrongArity { command: name, expected: 0, found: args.len() })
            }
        };
        match verb.as_str() {
            "arm" => nullary(Command::Arm, "arm"),
            "disarm" => nullary(Command::Disarm, "disarm"),
            "takeoff" => nullary(Command::Takeoff, "takeoff"),
            "land" => nullary(Command::Land, "land"),
            "hover" => nullary(Command::Hover, "hover"),
            "emergency" | "estop" => nullary(Command::Emergency, "emergency"),
            "rth" | "return_home" => nullary(Command::ReturnHome, "rth"),
            "goto" | "navigate" => {
                if args.len() != 3 {
                    return Err(CommandParseError::WrongArity {
                        command: "goto",
                        expected: 3,
                        found: args.len(),
                    });
                }
                let coords = args
                    .iter()
                    .map(|raw| {
                        raw.parse::<f64>()
                            .ok()
                            .filter(|v| v.is_finite())
                            .ok_or_else(|| CommandParseError::InvalidNumber((*raw).to_string()))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Command::Navigate(Vec3D::new(coords[0], coords[1], coords[2])))
            }
            other => Err(CommandParseError::UnknownCommand(other.to_string())),
        }
    }
}
