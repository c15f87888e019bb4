use crate::{CompassError, RngState};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MAX_TEAM_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamColor {
    Blue,
    Red,
    White,
}

impl TeamColor {
    pub fn color(self) -> u32 {
        match self {
            Self::Blue => 0x0000FF,
            Self::Red => 0xFF0000,
            Self::White => 0xFFFFFF,
        }
    }
}

impl fmt::Display for TeamColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Blue => "blue",
            Self::Red => "red",
            Self::White => "white",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub color: TeamColor,
    pub members: Vec<String>,
}

/// Splits `members` into as many Blue/Red pairs of `per_team` players as
/// fit; whoever is left over forms a White team. Duplicate names count once.
pub fn divide_teams(
    members: &[String],
    per_team: usize,
    rng: &mut RngState,
) -> Result<Vec<Team>, CompassError> {
    if per_team == 0 || per_team > MAX_TEAM_SIZE {
        return Err(CompassError::InvalidTeamSize(per_team));
    }
    let mut pool: Vec<String> = Vec::with_capacity(members.len());
    for member in members {
        if !pool.contains(member) {
            pool.push(member.clone());
        }
    }
    if pool.len() < 2 * per_team {
        return Err(CompassError::NotEnoughMembers {
            per_team,
            required: 2 * per_team,
            actual: pool.len(),
        });
    }

    let mut teams = Vec::new();
    for _ in 0..pool.len() / (2 * per_team) {
        for color in [TeamColor::Blue, TeamColor::Red] {
            let picked = rng.sample(&pool, per_team);
            pool.retain(|member| !picked.contains(member));
            teams.push(Team {
                color,
                members: picked,
            });
        }
    }
    if !pool.is_empty() {
        teams.push(Team {
            color: TeamColor::White,
            members: pool,
        });
    }
    Ok(teams)
}
