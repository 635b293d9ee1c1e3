use corridor_scene::{FloorPlacement, WallPlacement};
use glam::{Mat4, Vec3};

/// Floor model: the floor quad scaled in place, no translation.
pub fn floor_model(floor: &FloorPlacement) -> Mat4 {
    Mat4::from_scale(floor.scale)
}

/// Wall model: translate, then rotate about Y, then scale.
pub fn wall_model(wall: &WallPlacement) -> Mat4 {
    Mat4::from_translation(wall.position)
        * Mat4::from_rotation_y(wall.rotation_y)
        * Mat4::from_scale(wall.scale)
}

/// Yaw (radians) that turns a +Z-facing quad at `position` towards `camera`
/// on the horizontal plane.
pub fn billboard_angle(camera: Vec3, position: Vec3) -> f32 {
    (camera.x - position.x).atan2(camera.z - position.z)
}

/// Enemy model: translate to the placement, then face the camera about Y.
pub fn enemy_model(position: Vec3, camera: Vec3) -> Mat4 {
    Mat4::from_translation(position) * Mat4::from_rotation_y(billboard_angle(camera, position))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn floor_model_is_pure_scale() {
        let m = floor_model(&FloorPlacement::default());
        assert_eq!(m, Mat4::from_scale(Vec3::new(100.0, 1.0, 100.0)));
        let corner = m.transform_point3(Vec3::new(1.0, 0.0, -1.0));
        assert_eq!(corner, Vec3::new(100.0, 0.0, -100.0));
    }

    #[test]
    fn wall_without_rotation_is_translate_times_scale() {
        let wall = WallPlacement {
            position: Vec3::new(5.0, 0.0, -5.0),
            scale: Vec3::new(1.0, 2.0, 10.0),
            rotation_y: 0.0,
        };
        let m = wall_model(&wall);
        let expected = Mat4::from_translation(wall.position) * Mat4::from_scale(wall.scale);
        assert!(m.abs_diff_eq(expected, 1e-6));

        // Sprite quad corners: x in [-0.5, 0.5], y in [0, 1], z = 0.
        let corners = [
            (Vec3::new(-0.5, 0.0, 0.0), Vec3::new(4.5, 0.0, -5.0)),
            (Vec3::new(0.5, 0.0, 0.0), Vec3::new(5.5, 0.0, -5.0)),
            (Vec3::new(0.5, 1.0, 0.0), Vec3::new(5.5, 2.0, -5.0)),
            (Vec3::new(-0.5, 1.0, 0.0), Vec3::new(4.5, 2.0, -5.0)),
        ];
        for (local, world) in corners {
            assert!(m.transform_point3(local).abs_diff_eq(world, 1e-6));
        }
    }

    #[test]
    fn wall_rotation_applies_after_scale() {
        let wall = WallPlacement {
            position: Vec3::ZERO,
            scale: Vec3::new(10.0, 2.0, 1.0),
            rotation_y: FRAC_PI_2,
        };
        // Local +X is scaled to 10 then turned onto -Z.
        let p = wall_model(&wall).transform_point3(Vec3::X);
        assert!(p.abs_diff_eq(Vec3::new(0.0, 0.0, -10.0), 1e-5));
    }

    #[test]
    fn billboard_facing_camera_straight_ahead() {
        assert_eq!(billboard_angle(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO), 0.0);
    }

    #[test]
    fn billboard_turns_towards_side_and_back() {
        let side = billboard_angle(Vec3::new(3.0, 0.0, 0.0), Vec3::ZERO);
        assert!((side - FRAC_PI_2).abs() < 1e-6);
        let behind = billboard_angle(Vec3::new(0.0, 0.0, -4.0), Vec3::ZERO);
        assert!((behind.abs() - PI).abs() < 1e-6);
    }

    #[test]
    fn billboard_ignores_height_difference() {
        let low = billboard_angle(Vec3::new(2.0, 0.0, 2.0), Vec3::ZERO);
        let high = billboard_angle(Vec3::new(2.0, 50.0, 2.0), Vec3::ZERO);
        assert_eq!(low, high);
    }

    #[test]
    fn enemy_quad_normal_points_at_camera() {
        let camera = Vec3::new(4.0, 0.75, 9.0);
        let position = Vec3::new(1.0, 0.0, -3.0);
        let m = enemy_model(position, camera);
        let facing = m.transform_vector3(Vec3::Z);
        let to_camera = (camera - position).with_y(0.0).normalize();
        assert!(facing.abs_diff_eq(to_camera, 1e-5));
        assert!(m.transform_point3(Vec3::ZERO).abs_diff_eq(position, 1e-6));
    }
}
