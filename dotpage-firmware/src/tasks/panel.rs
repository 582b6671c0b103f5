//! Panel task - scans the shared framebuffer out to the modules

use defmt::*;
use dotpage_hal_rp2040::PanelBuffer;

use crate::board::Panel;

#[embassy_executor::task]
pub async fn panel_task(mut driver: Panel, buffer: &'static PanelBuffer) {
    info!("Panel scan task started");
    driver.refresh(buffer).await
}
