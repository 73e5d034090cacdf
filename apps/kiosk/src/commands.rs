use anyhow::{anyhow, bail, Context};
use shared::{
    domain::{DetailTicket, PartId, View},
    protocol::TourCommand,
};

pub const HELP: &str = "commands: stop | restart | skip | close | front | back | click <part-id> | \
slide | gallery <index> | gallery-next | gallery-prev | gallery-close | dismiss | <json command>";

/// Parses one line typed on the kiosk console. `skip` and `close` address the
/// detail currently on screen.
pub fn parse_command(line: &str, open_detail: Option<DetailTicket>) -> anyhow::Result<TourCommand> {
    let line = line.trim();
    if line.starts_with('{') {
        return serde_json::from_str(line).context("invalid JSON tour command");
    }

    let mut words = line.split_whitespace();
    let verb = words.next().unwrap_or_default().to_ascii_lowercase();
    let arg = words.next();

    let command = match verb.as_str() {
        "stop" => TourCommand::Stop,
        "restart" => TourCommand::Restart,
        "dismiss" => TourCommand::Dismiss,
        "skip" => TourCommand::SkipRequested {
            ticket: open_detail.ok_or_else(|| anyhow!("no detail is open"))?,
        },
        "close" => TourCommand::DetailClosed {
            ticket: open_detail.ok_or_else(|| anyhow!("no detail is open"))?,
        },
        "front" => TourCommand::SelectView { view: View::Front },
        "back" => TourCommand::SelectView { view: View::Back },
        "click" => {
            let raw = arg.ok_or_else(|| anyhow!("click needs a part id"))?;
            let part_id = raw
                .parse::<u32>()
                .with_context(|| format!("'{raw}' is not a part id"))?;
            TourCommand::PartClicked {
                part_id: PartId(part_id),
            }
        }
        "slide" => TourCommand::CloseSlide,
        "gallery" => {
            let index = match arg {
                Some(raw) => raw
                    .parse::<usize>()
                    .with_context(|| format!("'{raw}' is not a gallery index"))?,
                None => 0,
            };
            TourCommand::OpenGallery { index }
        }
        "gallery-next" => TourCommand::GalleryNext,
        "gallery-prev" => TourCommand::GalleryPrev,
        "gallery-close" => TourCommand::CloseGallery,
        "" => bail!("empty command"),
        other => bail!("unknown command '{other}'"),
    };
    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_console_verbs() {
        assert_eq!(parse_command("stop", None).expect("stop"), TourCommand::Stop);
        assert_eq!(
            parse_command("  click 4 ", None).expect("click"),
            TourCommand::PartClicked { part_id: PartId(4) }
        );
        assert_eq!(
            parse_command("BACK", None).expect("back"),
            TourCommand::SelectView { view: View::Back }
        );
        assert_eq!(
            parse_command("gallery", None).expect("gallery"),
            TourCommand::OpenGallery { index: 0 }
        );
    }

    #[test]
    fn skip_targets_the_open_detail() {
        assert!(parse_command("skip", None).is_err());
        assert_eq!(
            parse_command("skip", Some(DetailTicket(7))).expect("skip"),
            TourCommand::SkipRequested {
                ticket: DetailTicket(7)
            }
        );
    }

    #[test]
    fn accepts_tagged_json() {
        let command = parse_command(
            r#"{"type":"video_finished","payload":{"ticket":3}}"#,
            None,
        )
        .expect("json command");
        assert_eq!(
            command,
            TourCommand::VideoFinished {
                ticket: DetailTicket(3)
            }
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_command("", None).is_err());
        assert!(parse_command("dance", None).is_err());
        assert!(parse_command("click wheel", None).is_err());
    }
}
