//! Encoder task - decodes quadrature edges into the shared counter

use defmt::*;
use dotpage_hal_rp2040::EncoderCounter;
use embassy_rp::gpio::Input;

#[embassy_executor::task]
pub async fn encoder_task(a: Input<'static>, b: Input<'static>, counter: &'static EncoderCounter) {
    info!("Encoder task started");
    counter.track(a, b).await
}
