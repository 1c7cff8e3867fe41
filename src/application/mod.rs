// ============================================================
// Application / Use Cases
// ============================================================
// Orchestrates the other layers to accomplish one of the two
// goals: training the enlarger or enhancing image files.
//
// Rules for this layer:
//   - No ML math or model code here
//   - No argument parsing or printing here (that's the CLI)
//   - Only workflow coordination

// The training workflow
pub mod train_use_case;

// The enhance (inference) workflow
pub mod enhance_use_case;
