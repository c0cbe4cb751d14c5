use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Municipality {
    pub id: Uuid,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub state: State,
}

/// Brazilian federal units, stored and serialized by their two-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum State {
    Ac,
    Al,
    Ap,
    Am,
    Ba,
    Ce,
    Df,
    Es,
    Go,
    Ma,
    Mt,
    Ms,
    Mg,
    Pa,
    Pb,
    Pr,
    Pe,
    Pi,
    Rj,
    Rn,
    Rs,
    Ro,
    Rr,
    Sc,
    Sp,
    Se,
    To,
}

impl State {
    pub const ALL: [State; 27] = [
        State::Ac,
        State::Al,
        State::Ap,
        State::Am,
        State::Ba,
        State::Ce,
        State::Df,
        State::Es,
        State::Go,
        State::Ma,
        State::Mt,
        State::Ms,
        State::Mg,
        State::Pa,
        State::Pb,
        State::Pr,
        State::Pe,
        State::Pi,
        State::Rj,
        State::Rn,
        State::Rs,
        State::Ro,
        State::Rr,
        State::Sc,
        State::Sp,
        State::Se,
        State::To,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            State::Ac => "AC",
            State::Al => "AL",
            State::Ap => "AP",
            State::Am => "AM",
            State::Ba => "BA",
            State::Ce => "CE",
            State::Df => "DF",
            State::Es => "ES",
            State::Go => "GO",
            State::Ma => "MA",
            State::Mt => "MT",
            State::Ms => "MS",
            State::Mg => "MG",
            State::Pa => "PA",
            State::Pb => "PB",
            State::Pr => "PR",
            State::Pe => "PE",
            State::Pi => "PI",
            State::Rj => "RJ",
            State::Rn => "RN",
            State::Rs => "RS",
            State::Ro => "RO",
            State::Rr => "RR",
            State::Sc => "SC",
            State::Sp => "SP",
            State::Se => "SE",
            State::To => "TO",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown state code: {0}")]
pub struct UnknownState(pub String);

impl FromStr for State {
    type Err = UnknownState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        State::ALL
            .iter()
            .copied()
            .find(|state| state.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| UnknownState(s.to_string()))
    }
}

impl TryFrom<String> for State {
    type Error = UnknownState;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
