//! Default editor scene: a ground plane, the sky camera, two jointed robots
//! and two light markers.

use glam::Vec3;

use crate::errors::Result;
use crate::math::RigidTransform;
use crate::scene::node::ShapeOffset;
use crate::scene::resources::{Geometry, Material, Shading};
use crate::scene::scene::SceneGraph;
use crate::scene::{GeometryKey, MaterialKey, NodeKey};

pub const GROUND_Y: f32 = -2.0;
pub const GROUND_HALF_SIZE: f32 = 10.0;
pub const SKY_START: Vec3 = Vec3::new(0.0, 0.25, 4.0);

const ARM_LEN: f32 = 0.7;
const ARM_THICK: f32 = 0.25;
const TORSO_LEN: f32 = 1.5;
const TORSO_THICK: f32 = 0.25;
const TORSO_WIDTH: f32 = 1.0;
const JOINT_GAP: f32 = 0.05;

/// Joints per robot, the base node included.
pub const ROBOT_JOINTS: usize = 10;

struct JointDesc {
    name: &'static str,
    /// Index into the joint table; `None` for the base.
    parent: Option<usize>,
    offset: Vec3,
}

struct ShapeDesc {
    joint: usize,
    offset: Vec3,
    scale: Vec3,
    sphere: bool,
}

const JOINTS: [JointDesc; ROBOT_JOINTS] = [
    JointDesc { name: "Torso", parent: None, offset: Vec3::ZERO },
    JointDesc { name: "UpperRightArm", parent: Some(0), offset: Vec3::new(TORSO_WIDTH / 2.0, TORSO_LEN / 2.0, 0.0) },
    JointDesc { name: "LowerRightArm", parent: Some(1), offset: Vec3::new(ARM_LEN + JOINT_GAP, 0.0, 0.0) },
    JointDesc { name: "UpperLeftArm", parent: Some(0), offset: Vec3::new(-TORSO_WIDTH / 2.0, TORSO_LEN / 2.0, 0.0) },
    JointDesc { name: "LowerLeftArm", parent: Some(3), offset: Vec3::new(-ARM_LEN - JOINT_GAP, 0.0, 0.0) },
    JointDesc { name: "Head", parent: Some(0), offset: Vec3::new(0.0, TORSO_LEN / 2.0, 0.0) },
    JointDesc { name: "UpperRightLeg", parent: Some(0), offset: Vec3::new(TORSO_WIDTH / 2.0, -TORSO_LEN / 2.0, 0.0) },
    JointDesc { name: "LowerRightLeg", parent: Some(6), offset: Vec3::new(0.0, -ARM_LEN - JOINT_GAP, 0.0) },
    JointDesc { name: "UpperLeftLeg", parent: Some(0), offset: Vec3::new(-TORSO_WIDTH / 2.0, -TORSO_LEN / 2.0, 0.0) },
    JointDesc { name: "LowerLeftLeg", parent: Some(8), offset: Vec3::new(0.0, -ARM_LEN - JOINT_GAP, 0.0) },
];

const ARM_X: Vec3 = Vec3::new(ARM_LEN, ARM_THICK, ARM_THICK);
const LEG_Y: Vec3 = Vec3::new(ARM_THICK, ARM_LEN, ARM_THICK);

const SHAPES: [ShapeDesc; ROBOT_JOINTS] = [
    ShapeDesc { joint: 0, offset: Vec3::ZERO, scale: Vec3::new(TORSO_WIDTH, TORSO_LEN, TORSO_THICK), sphere: false },
    ShapeDesc { joint: 1, offset: Vec3::new(ARM_LEN / 2.0, 0.0, 0.0), scale: ARM_X, sphere: false },
    ShapeDesc { joint: 2, offset: Vec3::new(ARM_LEN / 2.0, 0.0, 0.0), scale: ARM_X, sphere: false },
    ShapeDesc { joint: 3, offset: Vec3::new(-ARM_LEN / 2.0, 0.0, 0.0), scale: ARM_X, sphere: false },
    ShapeDesc { joint: 4, offset: Vec3::new(-ARM_LEN / 2.0, 0.0, 0.0), scale: ARM_X, sphere: false },
    ShapeDesc { joint: 5, offset: Vec3::new(0.0, 0.5, 0.0), scale: Vec3::splat(0.3), sphere: true },
    ShapeDesc { joint: 6, offset: Vec3::new(0.0, -ARM_LEN / 2.0, 0.0), scale: LEG_Y, sphere: false },
    ShapeDesc { joint: 7, offset: Vec3::new(0.0, -ARM_LEN / 2.0, 0.0), scale: LEG_Y, sphere: false },
    ShapeDesc { joint: 8, offset: Vec3::new(0.0, -ARM_LEN / 2.0, 0.0), scale: LEG_Y, sphere: false },
    ShapeDesc { joint: 9, offset: Vec3::new(0.0, -ARM_LEN / 2.0, 0.0), scale: LEG_Y, sphere: false },
];

/// Keys of the notable nodes and resources of the default scene.
#[derive(Debug, Clone, Copy)]
pub struct SceneHandles {
    pub world: NodeKey,
    pub sky: NodeKey,
    pub ground: NodeKey,
    pub robots: [NodeKey; 2],
    pub lights: [NodeKey; 2],
    pub cube: GeometryKey,
    pub sphere: GeometryKey,
    pub arcball_material: MaterialKey,
    pub pick_material: MaterialKey,
}

/// Builds the default scene.
pub fn build_default_scene() -> Result<(SceneGraph, SceneHandles)> {
    let mut scene = SceneGraph::new();
    let world = scene.root();

    let cube = scene.add_geometry(Geometry::cube(1.0));
    let sphere = scene.add_geometry(Geometry::sphere(1.0));
    let ground_plane = scene.add_geometry(Geometry::plane(GROUND_HALF_SIZE * 2.0));

    let red = scene.add_material(Material::diffuse("RedDiffuse", Vec3::new(1.0, 0.0, 0.0)));
    let blue = scene.add_material(Material::diffuse("BlueDiffuse", Vec3::new(0.0, 0.0, 1.0)));
    let floor = scene.add_material(Material::new("BumpFloor", Shading::NormalMapped, Vec3::ONE));
    let arcball_material = scene.add_material(
        Material::solid("Arcball", Vec3::new(0.27, 0.82, 0.35)).with_wireframe(true),
    );
    let light_material = scene.add_material(Material::solid("Light", Vec3::ONE));
    let pick_material = scene.add_material(Material::new("Pick", Shading::Pick, Vec3::ZERO));

    let sky = scene.add_transform(world, "Sky", RigidTransform::from_translation(SKY_START))?;

    let ground = scene.add_transform(world, "Ground", RigidTransform::IDENTITY)?;
    scene.add_shape(
        ground,
        "GroundPlane",
        ground_plane,
        floor,
        ShapeOffset::translated(Vec3::new(0.0, GROUND_Y, 0.0)),
    )?;

    let robot1 = scene.add_transform(
        world,
        "Robot1",
        RigidTransform::from_translation(Vec3::new(-2.0, 1.0, 0.0)),
    )?;
    let robot2 = scene.add_transform(
        world,
        "Robot2",
        RigidTransform::from_translation(Vec3::new(2.0, 1.0, 0.0)),
    )?;
    build_robot(&mut scene, robot1, cube, sphere, red)?;
    build_robot(&mut scene, robot2, cube, sphere, blue)?;

    let light1 = scene.add_transform(
        world,
        "Light1",
        RigidTransform::from_translation(Vec3::new(4.0, 3.0, 3.0)),
    )?;
    let light2 = scene.add_transform(
        world,
        "Light2",
        RigidTransform::from_translation(Vec3::new(-4.0, 1.5, -3.0)),
    )?;
    for light in [light1, light2] {
        scene.add_shape(
            light,
            "LightMarker",
            sphere,
            light_material,
            ShapeOffset::new(Vec3::ZERO, Vec3::splat(0.5)),
        )?;
    }

    log::debug!("Default scene built with {} nodes", scene.len());

    Ok((
        scene,
        SceneHandles {
            world,
            sky,
            ground,
            robots: [robot1, robot2],
            lights: [light1, light2],
            cube,
            sphere,
            arcball_material,
            pick_material,
        },
    ))
}

/// Hangs the joint hierarchy and body shapes below `base`.
///
/// All joints are created before any shape, so within each joint the child
/// joints precede the shape in child order.
pub fn build_robot(
    scene: &mut SceneGraph,
    base: NodeKey,
    cube: GeometryKey,
    sphere: GeometryKey,
    material: MaterialKey,
) -> Result<[NodeKey; ROBOT_JOINTS]> {
    let mut joints = [base; ROBOT_JOINTS];
    for (i, desc) in JOINTS.iter().enumerate() {
        if let Some(parent) = desc.parent {
            joints[i] = scene.add_transform(
                joints[parent],
                desc.name,
                RigidTransform::from_translation(desc.offset),
            )?;
        }
    }

    for desc in &SHAPES {
        let geometry = if desc.sphere { sphere } else { cube };
        scene.add_shape(
            joints[desc.joint],
            JOINTS[desc.joint].name,
            geometry,
            material,
            ShapeOffset::new(desc.offset, desc.scale),
        )?;
    }

    Ok(joints)
}
