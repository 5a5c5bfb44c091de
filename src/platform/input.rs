//! Key and swipe mapping

use crate::sim::Heading;

/// Host command understood by `Game::handle`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Steer(Heading),
    Start,
    Close,
}

/// Map a `KeyboardEvent.key` value to a command
pub fn command_for_key(key: &str) -> Option<Command> {
    let command = match key {
        "ArrowUp" | "w" | "W" => Command::Steer(Heading::Up),
        "ArrowDown" | "s" | "S" => Command::Steer(Heading::Down),
        "ArrowLeft" | "a" | "A" => Command::Steer(Heading::Left),
        "ArrowRight" | "d" | "D" => Command::Steer(Heading::Right),
        "Enter" => Command::Start,
        "Escape" => Command::Close,
        _ => return None,
    };
    Some(command)
}

/// Heading for a swipe along its dominant axis (screen y grows downward)
pub fn heading_for_swipe(dx: f32, dy: f32) -> Option<Heading> {
    if !dx.is_finite() || !dy.is_finite() || (dx == 0.0 && dy == 0.0) {
        return None;
    }
    let heading = if dx.abs() > dy.abs() {
        if dx > 0.0 { Heading::Right } else { Heading::Left }
    } else if dy > 0.0 {
        Heading::Down
    } else {
        Heading::Up
    };
    Some(heading)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys() {
        assert_eq!(command_for_key("ArrowUp"), Some(Command::Steer(Heading::Up)));
        assert_eq!(command_for_key("W"), Some(Command::Steer(Heading::Up)));
        assert_eq!(command_for_key("a"), Some(Command::Steer(Heading::Left)));
        assert_eq!(command_for_key("S"), Some(Command::Steer(Heading::Down)));
        assert_eq!(command_for_key("ArrowRight"), Some(Command::Steer(Heading::Right)));
        assert_eq!(command_for_key("Enter"), Some(Command::Start));
        assert_eq!(command_for_key("Escape"), Some(Command::Close));
        assert_eq!(command_for_key(" "), None);
        assert_eq!(command_for_key("q"), None);
    }

    #[test]
    fn test_swipes() {
        assert_eq!(heading_for_swipe(40.0, 10.0), Some(Heading::Right));
        assert_eq!(heading_for_swipe(-40.0, 39.0), Some(Heading::Left));
        assert_eq!(heading_for_swipe(5.0, 30.0), Some(Heading::Down));
        assert_eq!(heading_for_swipe(5.0, -30.0), Some(Heading::Up));
        // Diagonal ties go vertical
        assert_eq!(heading_for_swipe(20.0, -20.0), Some(Heading::Up));
        assert_eq!(heading_for_swipe(0.0, 0.0), None);
        assert_eq!(heading_for_swipe(f32::NAN, 1.0), None);
    }
}
