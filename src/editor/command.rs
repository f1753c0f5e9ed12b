/// Keyboard commands of the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Help,
    /// Look through the next eye: sky, robot 1, robot 2.
    CycleEye,
    /// Toggle rotating the sky camera about itself vs. the world origin.
    ToggleSkySky,
    /// The next left button event picks instead of dragging.
    TogglePickMode,
    /// Copy the cursor frame into the scene.
    LoadFrame,
    /// Overwrite the cursor frame with the scene (insert at the end sentinel).
    UpdateFrame,
    NextFrame,
    PreviousFrame,
    DeleteFrame,
    /// Insert the current scene as a new frame after the cursor.
    NewFrame,
    LoadAnimation,
    SaveAnimation,
    /// Start playback, or ask a running playback to stop.
    PlayStop,
    Slower,
    Faster,
    Quit,
}

pub const HELP_TEXT: &str = "\
h\t\thelp menu
v\t\tcycle view (sky, robot 1, robot 2)
m\t\ttoggle sky-sky / world-sky rotation
p\t\tpick the next clicked part
drag left\trotate
drag right\ttranslate in x and y
drag middle\ttranslate in z
space\t\tload the current frame
u\t\tupdate the current frame
> or .\t\tnext frame
< or ,\t\tprevious frame
d\t\tdelete the current frame
n\t\tnew frame after the current one
i\t\tload animation file
w\t\twrite animation file
y\t\tplay / stop animation
- or _\t\tslower playback
+ or =\t\tfaster playback
esc\t\tquit";

impl Command {
    #[must_use]
    pub fn from_key(key: char) -> Option<Self> {
        Some(match key {
            'h' => Self::Help,
            'v' => Self::CycleEye,
            'm' => Self::ToggleSkySky,
            'p' => Self::TogglePickMode,
            ' ' => Self::LoadFrame,
            'u' => Self::UpdateFrame,
            '>' | '.' => Self::NextFrame,
            '<' | ',' => Self::PreviousFrame,
            'd' => Self::DeleteFrame,
            'n' => Self::NewFrame,
            'i' => Self::LoadAnimation,
            'w' => Self::SaveAnimation,
            'y' => Self::PlayStop,
            '-' | '_' => Self::Slower,
            '+' | '=' => Self::Faster,
            '\u{1b}' => Self::Quit,
            _ => return None,
        })
    }

    /// Commands that touch the keyframe list or the scene poses, and are
    /// therefore refused while an animation plays.
    #[must_use]
    pub fn is_editing(self) -> bool {
        matches!(
            self,
            Self::LoadFrame
                | Self::UpdateFrame
                | Self::NextFrame
                | Self::PreviousFrame
                | Self::DeleteFrame
                | Self::NewFrame
                | Self::LoadAnimation
                | Self::SaveAnimation
        )
    }
}
