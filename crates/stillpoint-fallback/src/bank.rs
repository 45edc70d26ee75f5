// SPDX-FileCopyrightText: 2026 Stillpoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The hand-authored script bank, one entry per supported goal.

use stillpoint_core::Goal;

/// A static three-part script. Compiled in, never persisted.
pub(crate) struct FallbackEntry {
    pub intro: &'static str,
    pub main: &'static str,
    pub closing: &'static str,
}

pub(crate) fn entry_for(goal: Goal) -> &'static FallbackEntry {
    match goal {
        Goal::Sleep => &SLEEP,
        Goal::Stress => &STRESS,
        Goal::Anxiety => &ANXIETY,
        Goal::Focus => &FOCUS,
        Goal::Energy => &ENERGY,
        Goal::Relaxation => &RELAXATION,
    }
}

static SLEEP: FallbackEntry = FallbackEntry {
    intro: "Welcome to this sleep meditation. Settle into your bed and let your body \
            grow heavy against the mattress. Close your eyes, and know that there is \
            nothing left to do tonight except rest.",
    main: "Take a slow breath in through your nose, and let it go with a long, soft \
           sigh. With every exhale, imagine sinking a little deeper into warmth and \
           stillness. Feel your forehead smooth, your jaw unclench, your shoulders \
           melt away from your ears. You are safe, you are comfortable, and sleep is \
           already on its way. Let your thoughts drift past like slow clouds in a \
           night sky, each one dimmer than the last. Breathe in calm, breathe out the \
           day. There is nowhere to be but here, nothing to hold but this gentle \
           rhythm of breath.",
    closing: "As this meditation fades, allow yourself to drift. Your body knows how \
              to sleep. Release the night to itself, and rest deeply until morning.",
};

static STRESS: FallbackEntry = FallbackEntry {
    intro: "Welcome to this meditation for stress relief. Find a position that feels \
            supported, and let your hands rest wherever they are comfortable. This \
            time is yours alone.",
    main: "Begin by taking a deep breath in for a count of four, holding gently for \
           four, and releasing for a slow count of six. With each long exhale, feel \
           the pressure of the day loosening its grip. Notice where your body holds \
           tension, and breathe space into those places. The demands waiting for you \
           will keep; right now, your only task is to breathe. You are steady. You \
           are capable. One breath at a time, the weight becomes lighter, and what \
           felt urgent softens into perspective.",
    closing: "Take one more full, unhurried breath. When you return to your day, \
              carry this steadiness with you. You can come back to this calm at any \
              time.",
};

static ANXIETY: FallbackEntry = FallbackEntry {
    intro: "Welcome to this calming meditation for anxious moments. Wherever you are, \
            let your feet feel the ground beneath you. You are here, and here is \
            safe.",
    main: "Breathe in slowly through your nose, and out even more slowly through \
           your mouth, as if cooling a warm drink. Feel the ground holding your \
           weight without any effort from you. Name silently three things you can \
           feel right now: perhaps the chair, your clothes, the air on your skin. \
           Anxiety is a wave, and waves always pass. You do not need to fight the \
           feeling, only to breathe beside it while it recedes. With every exhale \
           your heartbeat settles, your chest opens, and the moment becomes simply \
           a moment again.",
    closing: "Let your breathing return to its own pace. You met this moment with \
              courage, and it is passing. Move gently into whatever comes next.",
};

static FOCUS: FallbackEntry = FallbackEntry {
    intro: "Welcome to this meditation for clarity and focus. Sit upright, alert yet \
            at ease, like a mountain that is unmoved by the wind.",
    main: "Bring your attention to the sensation of breath at the tip of your nose. \
           Cool air in, warm air out. Each time your mind wanders, notice where it \
           went without judgment, and escort it back to the breath. This returning \
           is the training; every return strengthens your attention. Let distractions \
           pass like traffic on a distant road, heard but not followed. Your mind is \
           clearing, gathering into a single, quiet point of awareness that you will \
           carry into your next task.",
    closing: "Take a final sharp, clear breath in, and release it fully. Open your \
              eyes. Your attention is gathered, and your work is waiting for this \
              clarity.",
};

static ENERGY: FallbackEntry = FallbackEntry {
    intro: "Welcome to this energizing meditation. Sit or stand tall, lift your chin \
            slightly, and invite a sense of brightness into your posture.",
    main: "Take a quick, full breath in through your nose, and let it out with an \
           audible sigh. Again: breathe in possibility, breathe out heaviness. Feel \
           energy gathering at the base of your spine and rising with each \
           inhalation, warming your chest, your arms, the crown of your head. Your \
           body is awake. Your mind is ready. Imagine sunlight filling the space \
           behind your eyes, dissolving fatigue like morning mist. With every breath \
           you are more alert, more present, more alive to the day in front of you.",
    closing: "Roll your shoulders back, take one vibrant breath, and smile. Step \
              into your day carrying this spark with you.",
};

static RELAXATION: FallbackEntry = FallbackEntry {
    intro: "Welcome to this relaxation meditation. Give yourself permission to pause. \
            Let your eyes close softly, and arrive exactly where you are.",
    main: "Breathe in gently for four counts, and release for six. Begin at the top \
           of your head and let relaxation travel downward like warm water: over \
           your brow, your jaw, your neck and shoulders, down your arms to your \
           fingertips. Your chest rises and falls without effort. Your belly \
           softens. Your legs grow pleasantly heavy. There is nothing you need to \
           change and nowhere you need to be. Each breath is an invitation to let \
           go a little more completely, and you may accept it at your own pace.",
    closing: "Slowly deepen your breath and wiggle your fingers and toes. When you \
              are ready, open your eyes, returning rested and at ease.",
};
