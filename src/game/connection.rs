/// Transport endpoint of one client, as seen by the game session.
///
/// Sending never blocks: implementations queue the line and return.
pub trait Connection {
    fn send_line(&self, line: &str);
    fn is_open(&self) -> bool;
}
