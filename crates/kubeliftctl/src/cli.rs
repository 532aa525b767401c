use clap::{Parser, Subcommand};
use std::path::PathBuf;

use kubelift_core::SubmitBackend;

/// Kubelift CLI - manifest lifecycle operations against a cluster
#[derive(Parser, Debug)]
#[command(name = "kubeliftctl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory the manifest store writes into
    #[arg(long, global = true, env = "KUBELIFT_STORE_DIR", default_value = "manifests")]
    pub store_dir: PathBuf,

    /// Default namespace for submissions
    #[arg(short, long, global = true, env = "KUBELIFT_NAMESPACE", default_value = "default")]
    pub namespace: String,

    /// Kubeconfig path for the kubectl backend (supplied externally, never
    /// located or validated by kubeliftctl)
    #[arg(long, global = true, env = "KUBECONFIG")]
    pub kubeconfig: Option<PathBuf>,

    /// Cluster API server base URL (required for the api backend)
    #[arg(long, global = true, env = "KUBELIFT_API_URL")]
    pub api_url: Option<String>,

    /// Schema discovery endpoint (defaults to <api-url>/openapi/v2)
    #[arg(long, global = true, env = "KUBELIFT_DISCOVERY_URL")]
    pub discovery_url: Option<String>,

    /// Submission backend: api or kubectl
    #[arg(long, global = true, env = "KUBELIFT_BACKEND", default_value = "kubectl")]
    pub backend: SubmitBackend,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Explain the fields of a resource kind (verb-first: explain Deployment)
    Explain {
        /// Resource kind in the cluster's canonical casing (e.g. Deployment)
        kind: String,
    },

    /// Save manifest text to the store (verb-first: save web.yaml -f deployment.yaml)
    Save {
        /// Name to store the manifest under
        name: String,

        /// Manifest file to read, or '-' for stdin
        #[arg(short, long, default_value = "-")]
        file: String,
    },

    /// Submit a stored manifest to the cluster (verb-first: submit web.yaml)
    Submit {
        /// Name of a stored manifest
        name: String,

        /// Target namespace (overrides the global default)
        #[arg(long)]
        to_namespace: Option<String>,
    },

    /// Build a Deployment manifest (verb-first: build-deployment nginx:latest 80 web 3)
    BuildDeployment {
        /// Container image
        image: String,

        /// Container port to expose
        port: u16,

        /// Deployment name (also the app label and selector)
        name: String,

        /// Number of pod replicas
        replicas: i32,

        /// Store name to persist the generated manifest under
        #[arg(long)]
        save_as: Option<String>,
    },
}
