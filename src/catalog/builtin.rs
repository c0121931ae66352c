//! Projects compiled into the page.

use super::ProjectDefinition;

pub(super) fn definitions() -> Vec<ProjectDefinition> {
    vec![
        ProjectDefinition::new(
            "ever",
            "EVER - Electric Vehicle Energy Recovery",
            &[
                "assets/projects/ever/ever-01.webp",
                "assets/projects/ever/ever-02.webp",
                "assets/projects/ever/ever-03.webp",
            ],
        ),
        ProjectDefinition::new(
            "chassis-gallery",
            "Formula Student Chassis",
            &[
                "assets/projects/chassis/chassis-01.webp",
                "assets/projects/chassis/chassis-02.webp",
                "assets/projects/chassis/chassis-03.webp",
                "assets/projects/chassis/chassis-04.webp",
                "assets/projects/chassis/chassis-05.webp",
            ],
        ),
        ProjectDefinition::new(
            "drone-frame",
            "Carbon Drone Frame",
            &[
                "assets/projects/drone/drone-01.webp",
                "assets/projects/drone/drone-02.webp",
                "assets/projects/drone/drone-03.webp",
                "assets/projects/drone/drone-04.webp",
            ],
        ),
        ProjectDefinition::new(
            "robot-arm",
            "Six-Axis Robot Arm",
            &[
                "assets/projects/robot-arm/arm-01.webp",
                "assets/projects/robot-arm/arm-02.webp",
            ],
        ),
        ProjectDefinition::new(
            "cnc-router",
            "Desktop CNC Router",
            &["assets/projects/cnc/cnc-01.webp"],
        ),
    ]
}
