//! The rules text shown by the view-rules action.

/// Rules as shown to the player.
///
/// The golden GPU line is part of the story; no win condition reads it.
pub const RULES: &str = "\
MOVEMENT:
- Move between rooms with the arrow directions (up, down, left, right)
- The Whompus moves faster as you make more moves
- Before 30 moves: the Whompus moves every third turn
- After 30 moves: the Whompus moves every other turn
- After 50 moves: the Whompus moves every turn
- Each action (move, ask AI, view rules) counts as a move

AI ASSISTANTS:
- Three AIs are available: ALI, AN, and ALE
- One always tells the truth
- One always lies
- One is 50/50 (randomly tells truth or lies)
- AIs can only see adjacent rooms
- They can control trap doors
- Selecting an AI counts as a move, even if you don't ask

WINNING:
- Find the golden GPU to win
- Avoid the Whompus and trap doors
- Use the AIs wisely to gather information";
