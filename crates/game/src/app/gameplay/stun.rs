/// Interrupt capability. Attack code stuns whatever implements this without
/// knowing the concrete enemy type.
pub trait Stunnable {
    /// Cancels any pending wait, zeroes velocity and enters the stunned
    /// state. Returns `false` when the target cannot be stunned right now.
    fn apply_stun(&mut self) -> bool;
    fn is_stunned(&self) -> bool;
}
