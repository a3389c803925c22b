use bevy::prelude::*;

use crate::{
    components::MenuButton,
    constants::*,
    markers::{MenuCameraMarker, MenuMarker, MenuStatusUIMarker},
    resources::MenuStatus,
};
use common::session::{SessionLauncher, SessionRole};

// ============================================================================
// Menu Actions
// ============================================================================

// Run a menu action and describe the outcome for the status line
pub fn launch(launcher: &mut SessionLauncher, action: MenuButton) -> String {
    let result = match action {
        MenuButton::Host => launcher.start_as_host(),
        MenuButton::Join => launcher.start_as_client(),
    };

    match result {
        Ok(SessionRole::Host) => "Hosting, loading the game".to_string(),
        Ok(SessionRole::Client) => "Connecting to the host".to_string(),
        Ok(SessionRole::Unset) => String::new(),
        Err(e) => format!("Error: {e}"),
    }
}

// ============================================================================
// Menu Systems
// ============================================================================

pub fn setup_menu_system(mut commands: Commands, status: Res<MenuStatus>) {
    commands.spawn((Camera2d, MenuCameraMarker, MenuMarker));

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(16.0),
                ..default()
            },
            MenuMarker,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("First Person"),
                TextFont {
                    font_size: MENU_TITLE_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));

            for (action, label) in [(MenuButton::Host, "Host (H)"), (MenuButton::Join, "Join (J)")] {
                parent
                    .spawn((
                        Button,
                        Node {
                            width: Val::Px(220.0),
                            height: Val::Px(56.0),
                            justify_content: JustifyContent::Center,
                            align_items: AlignItems::Center,
                            ..default()
                        },
                        BackgroundColor(color(MENU_BUTTON_COLOR)),
                        action,
                    ))
                    .with_children(|button| {
                        button.spawn((
                            Text::new(label),
                            TextFont {
                                font_size: MENU_BUTTON_FONT_SIZE,
                                ..default()
                            },
                            TextColor(Color::WHITE),
                        ));
                    });
            }

            parent.spawn((
                Text::new(status.0.clone()),
                TextFont {
                    font_size: MENU_STATUS_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.8)),
                MenuStatusUIMarker,
            ));
        });
}

fn color(rgb: [f32; 3]) -> Color {
    Color::srgb(rgb[0], rgb[1], rgb[2])
}

type MenuButtonQuery<'w, 's> =
    Query<'w, 's, (&'static Interaction, &'static MenuButton, &'static mut BackgroundColor), Changed<Interaction>>;

pub fn menu_button_system(
    mut buttons: MenuButtonQuery,
    mut launcher: ResMut<SessionLauncher>,
    mut status: ResMut<MenuStatus>,
) {
    for (interaction, action, mut background) in &mut buttons {
        match interaction {
            Interaction::Pressed => {
                background.0 = color(MENU_BUTTON_PRESSED_COLOR);
                status.0 = launch(&mut launcher, *action);
            }
            Interaction::Hovered => background.0 = color(MENU_BUTTON_HOVER_COLOR),
            Interaction::None => background.0 = color(MENU_BUTTON_COLOR),
        }
    }
}

// H hosts, J joins
pub fn menu_keyboard_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut launcher: ResMut<SessionLauncher>,
    mut status: ResMut<MenuStatus>,
) {
    let action = if keyboard.just_pressed(KeyCode::KeyH) {
        MenuButton::Host
    } else if keyboard.just_pressed(KeyCode::KeyJ) {
        MenuButton::Join
    } else {
        return;
    };

    status.0 = launch(&mut launcher, action);
}

pub fn menu_status_system(status: Res<MenuStatus>, mut texts: Query<&mut Text, With<MenuStatusUIMarker>>) {
    if !status.is_changed() {
        return;
    }

    for mut text in &mut texts {
        text.0.clone_from(&status.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_manager_is_shown_as_error() {
        let mut launcher = SessionLauncher::new(None, "GameScene");

        let status = launch(&mut launcher, MenuButton::Host);

        assert_eq!(status, "Error: session manager is not set up");
        assert_eq!(launcher.role(), SessionRole::Unset);
    }
}
