//! Inline-button payloads.
//!
//! Telegram limits callback data to 64 bytes, so payloads are short
//! `prefix:value` strings.

use anyhow::{anyhow, Result};

use crate::tournament::{Pick, RoundTag};
use crate::utils::validation::{validate_category_key, validate_gallery_file_name};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    /// `category:<key>`
    SelectCategory(String),
    /// `gallery:play`
    PlayGallery,
    /// `pick:<session>:<round>:<1|2>`, or the older `pick:<1|2>` that
    /// applies to whatever pair is open
    Pick { tag: Option<RoundTag>, pick: Pick },
    /// `gdel:<file name>`
    DeleteImage(String),
    /// `gclear:ask`, shows the confirmation buttons
    RequestClear,
    /// `gclear:yes` / `gclear:no`
    ClearGallery { confirmed: bool },
}

impl CallbackAction {
    pub fn parse(data: &str) -> Result<Self> {
        let (prefix, rest) = data.split_once(':').unwrap_or((data, ""));

        match prefix {
            "category" => {
                validate_category_key(rest)?;
                Ok(CallbackAction::SelectCategory(rest.to_string()))
            }
            "gallery" if rest == "play" => Ok(CallbackAction::PlayGallery),
            "pick" => parse_pick(rest),
            "gdel" => {
                validate_gallery_file_name(rest)?;
                Ok(CallbackAction::DeleteImage(rest.to_string()))
            }
            "gclear" => match rest {
                "ask" => Ok(CallbackAction::RequestClear),
                "yes" => Ok(CallbackAction::ClearGallery { confirmed: true }),
                "no" => Ok(CallbackAction::ClearGallery { confirmed: false }),
                _ => Err(anyhow!("Unknown gallery clear answer '{rest}'")),
            },
            _ => Err(anyhow!("Unknown callback data '{data}'")),
        }
    }

    pub fn to_data(&self) -> String {
        match self {
            CallbackAction::SelectCategory(key) => format!("category:{key}"),
            CallbackAction::PlayGallery => "gallery:play".to_string(),
            CallbackAction::Pick { tag, pick } => {
                let slot = match pick {
                    Pick::ChampionWins => 1,
                    Pick::ChallengerWins => 2,
                };
                match tag {
                    Some(tag) => format!("pick:{}:{}:{slot}", tag.session, tag.round),
                    None => format!("pick:{slot}"),
                }
            }
            CallbackAction::DeleteImage(file_name) => format!("gdel:{file_name}"),
            CallbackAction::RequestClear => "gclear:ask".to_string(),
            CallbackAction::ClearGallery { confirmed: true } => "gclear:yes".to_string(),
            CallbackAction::ClearGallery { confirmed: false } => "gclear:no".to_string(),
        }
    }
}

fn parse_pick(rest: &str) -> Result<CallbackAction> {
    let parts: Vec<&str> = rest.split(':').collect();
    let (tag, slot) = match parts.as_slice() {
        [session, round, slot] => {
            let session: u64 = session
                .parse()
                .map_err(|_| anyhow!("Invalid pick session '{session}'"))?;
            let round: usize = round
                .parse()
                .map_err(|_| anyhow!("Invalid pick round '{round}'"))?;
            if round == 0 {
                return Err(anyhow!("Pick round starts at 1"));
            }
            (Some(RoundTag { session, round }), *slot)
        }
        [slot] => (None, *slot),
        _ => return Err(anyhow!("Malformed pick '{rest}'")),
    };

    // Photo 1 is always the current champion
    let pick = match slot {
        "1" => Pick::ChampionWins,
        "2" => Pick::ChallengerWins,
        _ => return Err(anyhow!("Pick must be 1 or 2")),
    };

    Ok(CallbackAction::Pick { tag, pick })
}
