use crate::environment::Environment;
use crate::evolution::Evolution;
use crate::vector::Vector2;
use bevy::prelude::*;
use std::collections::HashMap;

/// Radius of a drawn bubble, in pixels
pub const BUBBLE_RADIUS: f32 = 3.0;

/// Width of the ring drawn around the target
const TARGET_RING_WIDTH: f32 = 1.5;

/// Draws the current environment and every live bubble
pub struct BubbleRenderPlugin;

impl Plugin for BubbleRenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BubbleSprites>()
            .init_resource::<EnvironmentSprites>()
            .add_systems(Startup, setup_render_assets)
            .add_systems(Update, (sync_environment, sync_bubbles).chain());
    }
}

/// Marks the drawn circle of one bubble
#[derive(Component)]
pub struct BubbleSprite {
    pub agent: usize,
}

/// Marks drawn target and obstacle shapes
#[derive(Component)]
pub struct EnvironmentSprite;

/// Side table from agent index to its drawn entity. Rebuilt every generation;
/// the simulation itself never sees render handles.
#[derive(Resource, Default)]
pub struct BubbleSprites {
    pub generation: Option<u32>,
    pub by_agent: HashMap<usize, Entity>,
}

#[derive(Resource, Default)]
pub struct EnvironmentSprites {
    pub epoch: Option<u32>,
    pub entities: Vec<Entity>,
}

/// Shared mesh and materials for bubbles and obstacles
#[derive(Resource)]
pub struct RenderAssets {
    bubble_mesh: Handle<Mesh>,
    bubble_material: Handle<ColorMaterial>,
    obstacle_material: Handle<ColorMaterial>,
    target_material: Handle<ColorMaterial>,
}

/// Convert screen pixels (origin top-left, y down) to world units (origin centre, y up)
pub fn screen_to_world(position: Vector2, env: &Environment, z: f32) -> Vec3 {
    Vec3::new(
        (position.x - env.width / 2.0) as f32,
        (env.height / 2.0 - position.y) as f32,
        z,
    )
}

pub fn setup_render_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    commands.insert_resource(RenderAssets {
        bubble_mesh: meshes.add(Circle::new(BUBBLE_RADIUS)),
        bubble_material: materials.add(ColorMaterial::from_color(Color::srgba(0.6, 0.85, 1.0, 0.8))),
        obstacle_material: materials.add(ColorMaterial::from_color(Color::srgb(0.9, 0.2, 0.2))),
        target_material: materials.add(ColorMaterial::from_color(Color::srgb(0.95, 0.95, 0.95))),
    });
}

/// Redraw target and obstacles whenever the environment is re-rolled
pub fn sync_environment(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    assets: Res<RenderAssets>,
    evolution: Res<Evolution>,
    mut sprites: ResMut<EnvironmentSprites>,
) {
    let epoch = evolution.environment_epoch();
    if sprites.epoch == Some(epoch) {
        return;
    }

    for entity in sprites.entities.drain(..) {
        commands.entity(entity).despawn();
    }

    let env = evolution.environment();
    for obstacle in &env.obstacles {
        let entity = commands
            .spawn((
                EnvironmentSprite,
                Mesh2d(meshes.add(Circle::new(obstacle.radius as f32))),
                MeshMaterial2d(assets.obstacle_material.clone()),
                Transform::from_translation(screen_to_world(obstacle.position, env, 0.0)),
            ))
            .id();
        sprites.entities.push(entity);
    }

    let radius = env.target.radius as f32;
    let target = commands
        .spawn((
            EnvironmentSprite,
            Mesh2d(meshes.add(Annulus::new((radius - TARGET_RING_WIDTH).max(0.0), radius))),
            MeshMaterial2d(assets.target_material.clone()),
            Transform::from_translation(screen_to_world(env.target.position, env, 0.1)),
        ))
        .id();
    sprites.entities.push(target);
    sprites.epoch = Some(epoch);
}

/// Keep one circle per live bubble: respawn for a new generation, follow
/// positions, and remove a bubble's circle when it dies.
pub fn sync_bubbles(
    mut commands: Commands,
    assets: Res<RenderAssets>,
    evolution: Res<Evolution>,
    mut sprites: ResMut<BubbleSprites>,
    mut transforms: Query<&mut Transform, With<BubbleSprite>>,
) {
    let env = evolution.environment();
    let population = evolution.population();

    if sprites.generation != Some(population.generation) {
        for (_, entity) in sprites.by_agent.drain() {
            commands.entity(entity).despawn();
        }
        for (agent, bubble) in population.agents.iter().enumerate() {
            if !bubble.is_alive() {
                continue;
            }
            let entity = commands
                .spawn((
                    BubbleSprite { agent },
                    Mesh2d(assets.bubble_mesh.clone()),
                    MeshMaterial2d(assets.bubble_material.clone()),
                    Transform::from_translation(screen_to_world(bubble.position, env, 1.0)),
                ))
                .id();
            sprites.by_agent.insert(agent, entity);
        }
        sprites.generation = Some(population.generation);
        return;
    }

    sprites.by_agent.retain(|&agent, &mut entity| {
        match population.agents.get(agent) {
            Some(bubble) if bubble.is_alive() => {
                if let Ok(mut transform) = transforms.get_mut(entity) {
                    transform.translation = screen_to_world(bubble.position, env, 1.0);
                }
                true
            }
            _ => {
                commands.entity(entity).despawn();
                false
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Target;

    #[test]
    fn screen_corners_map_to_world_corners() {
        let env = Environment::new(
            600.0,
            400.0,
            Target {
                position: Vector2::new(300.0, 200.0),
                radius: 10.0,
            },
            Vec::new(),
        );
        assert_eq!(screen_to_world(Vector2::new(0.0, 0.0), &env, 0.0), Vec3::new(-300.0, 200.0, 0.0));
        assert_eq!(screen_to_world(Vector2::new(600.0, 400.0), &env, 0.0), Vec3::new(300.0, -200.0, 0.0));
        assert_eq!(screen_to_world(env.target.position, &env, 2.0), Vec3::new(0.0, 0.0, 2.0));
    }
}
