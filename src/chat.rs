use crate::dto::ChatLine;
use crate::player::Player;

/// Chat-side collaborator of a session. Pure request/response over the
/// chat payload: the session forwards every incoming line verbatim along
/// with a read handle on the player, and asks for an evaluation to be
/// shared after each move it reports.
#[async_trait::async_trait(?Send)]
pub trait Commentator: Send {
    /// React to one incoming chat line.
    async fn handle(&mut self, line: &ChatLine, player: &dyn Player);

    /// Publish the player's evaluation of the position just reached.
    async fn share_eval(&mut self, player: &dyn Player);
}

/// Commentator that keeps quiet.
pub struct Mute;

#[async_trait::async_trait(?Send)]
impl Commentator for Mute {
    async fn handle(&mut self, _: &ChatLine, _: &dyn Player) {}
    async fn share_eval(&mut self, _: &dyn Player) {}
}
