//! Cloud platform adapters.

mod aws;
mod cloudinary;
mod netlify;
mod pusher;
mod supabase;
mod vercel;

pub use aws::AwsAdapter;
pub use cloudinary::CloudinaryAdapter;
pub use netlify::NetlifyAdapter;
pub use pusher::PusherAdapter;
pub use supabase::SupabaseAdapter;
pub use vercel::VercelAdapter;
