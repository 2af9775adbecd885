// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands that do not need the GUI

use pocket_camera::backends::audio::enumerate_audio_devices;
use pocket_camera::backends::camera::PipeWireController;

/// List cameras with their facing, plus the microphones recording would use
pub fn list_devices() -> Result<(), Box<dyn std::error::Error>> {
    gstreamer::init()?;

    let controller = PipeWireController::new(Default::default());
    let cameras: Vec<_> = controller.cameras().collect();

    if cameras.is_empty() {
        println!("No cameras found.");
    } else {
        println!("Available cameras:");
        println!();
        for (index, camera) in cameras.iter().enumerate() {
            let facing = camera
                .facing
                .map(|f| f.to_string())
                .unwrap_or_else(|| "external".to_string());
            println!("  [{}] {}", index, camera.name);
            println!("      Facing:   {}", facing);
            println!("      Rotation: {}", camera.rotation);
            println!("      Id:       {}", camera.path);
        }
    }

    println!();
    let microphones = enumerate_audio_devices();
    if microphones.is_empty() {
        println!("No microphones found; recordings will have no audio.");
    } else {
        println!("Microphones:");
        for mic in microphones {
            let marker = if mic.is_default { " (default)" } else { "" };
            println!("  - {}{}", mic.name, marker);
        }
    }

    Ok(())
}
